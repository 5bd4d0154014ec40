// autobackup/src/backup/snapshot.rs
use chrono::NaiveDate;

use super::naming::{backup_table_name, format_date_suffix};
use super::{PassReport, RunMode};
use crate::catalog::{Catalog, Selection};
use crate::errors::{AppError, Phase, Result};
use crate::utils::identifier::quote_ident;

/// Copies every source table to `{prefix}_{table}_{today}`.
///
/// The date suffix is computed once, so every backup of a run carries the
/// same date. Per-table failures (already exists, permissions, a name that
/// would be truncated) are logged and skipped.
pub async fn snapshot_tables<C: Catalog>(
    catalog: &C,
    prefix: &str,
    today: NaiveDate,
    mode: RunMode,
) -> Result<PassReport> {
    let date_suffix = format_date_suffix(today);
    tracing::info!(%prefix, %date_suffix, %mode, "Starting snapshot pass");

    let sources = catalog
        .list_tables(prefix, Selection::Sources)
        .await
        .map_err(|source| AppError::Catalog {
            phase: Phase::Snapshot,
            source,
        })?;

    let mut report = PassReport::new(sources.clone());

    for table in sources {
        let backup = backup_table_name(prefix, &table, &date_suffix);
        if mode.is_dry_run() {
            tracing::info!(%table, %backup, "Would create backup table");
            continue;
        }
        match create_backup_table(catalog, &table, &backup).await {
            Ok(()) => {
                tracing::info!(%table, %backup, "Created backup table");
                report.completed.push(backup);
            }
            Err(e) => {
                tracing::error!(%table, %backup, error = %e, "Failed to create backup table");
                report.failed.push((table, e.to_string()));
            }
        }
    }

    tracing::info!(
        sources = report.candidates.len(),
        created = report.completed.len(),
        failed = report.failed.len(),
        "Snapshot pass finished"
    );
    Ok(report)
}

async fn create_backup_table<C: Catalog>(catalog: &C, source: &str, backup: &str) -> Result<()> {
    let statement = format!(
        "CREATE TABLE {} AS SELECT * FROM {}",
        quote_ident(backup)?,
        quote_ident(source)?
    );
    catalog.execute(&statement).await?;
    Ok(())
}
