mod logic;
pub(crate) mod naming;
pub(crate) mod retention;
pub(crate) mod snapshot;

use anyhow::Result;
use chrono::Local;
use std::fmt;

use crate::catalog::PgCatalog;
use crate::config::AppConfig;
use crate::utils::setting;

pub use logic::{BackupOrchestrator, RunReport};

/// Whether DDL is executed or only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    DryRun,
    RealRun,
}

impl RunMode {
    pub fn from_flag(run: bool) -> Self {
        if run { RunMode::RealRun } else { RunMode::DryRun }
    }

    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::DryRun => write!(f, "dry-run"),
            RunMode::RealRun => write!(f, "real-run"),
        }
    }
}

/// Outcome of one pass over the catalog.
///
/// `candidates` is identical between dry-run and real-run; `completed` and
/// `failed` are only filled in real-run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub candidates: Vec<String>,
    /// Tables dropped, or backup tables created.
    pub completed: Vec<String>,
    /// Table name and cause for each soft failure.
    pub failed: Vec<(String, String)>,
}

impl PassReport {
    fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }
}

/// Public entry point for the backup process.
///
/// Opens the connection, runs both passes for today's date, and closes the
/// connection whether or not the run succeeded.
pub async fn run_backup_flow(app_config: &AppConfig, mode: RunMode) -> Result<RunReport> {
    let pool = setting::connect(
        &app_config.postgres.connection_url()?,
        &app_config.postgres.display_target(),
    )
    .await?;

    let orchestrator = BackupOrchestrator::new(
        PgCatalog::new(&pool),
        app_config.backup.prefix.clone(),
        app_config.backup.retention_days,
        mode,
    );
    let result = orchestrator.run(Local::now().date_naive()).await;

    pool.close().await;
    tracing::debug!("Connection closed");

    Ok(result?)
}
