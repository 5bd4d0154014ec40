// autobackup/src/backup/logic.rs
use chrono::NaiveDate;

use super::retention::sweep_expired_backups;
use super::snapshot::snapshot_tables;
use super::{PassReport, RunMode};
use crate::catalog::Catalog;
use crate::errors::Result;

/// Reports of both passes of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub retention: PassReport,
    pub snapshot: PassReport,
}

impl RunReport {
    pub fn soft_failures(&self) -> usize {
        self.retention.failed.len() + self.snapshot.failed.len()
    }
}

/// Runs the retention sweep, then the snapshot pass, against one catalog.
pub struct BackupOrchestrator<C> {
    catalog: C,
    prefix: String,
    retention_days: u32,
    mode: RunMode,
}

impl<C: Catalog> BackupOrchestrator<C> {
    pub fn new(catalog: C, prefix: String, retention_days: u32, mode: RunMode) -> Self {
        Self {
            catalog,
            prefix,
            retention_days,
            mode,
        }
    }

    /// Expired backups are cleared before new ones are named, so a same-day
    /// rerun with zero retention finds the name free. A hard error in either
    /// phase is returned as is; whatever the first phase already did stays done.
    pub async fn run(&self, today: NaiveDate) -> Result<RunReport> {
        tracing::info!(mode = %self.mode, %today, "Starting backup run");

        let retention = sweep_expired_backups(
            &self.catalog,
            &self.prefix,
            self.retention_days,
            today,
            self.mode,
        )
        .await?;

        let snapshot = snapshot_tables(&self.catalog, &self.prefix, today, self.mode).await?;

        let report = RunReport {
            retention,
            snapshot,
        };
        if report.soft_failures() > 0 {
            tracing::warn!(
                failures = report.soft_failures(),
                "Backup run finished with per-table failures"
            );
        }
        Ok(report)
    }
}
