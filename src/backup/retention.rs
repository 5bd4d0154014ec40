// autobackup/src/backup/retention.rs
use chrono::NaiveDate;

use super::naming::{is_expired, original_table_name, retention_threshold};
use super::{PassReport, RunMode};
use crate::catalog::{Catalog, Selection};
use crate::errors::{AppError, Phase, Result};
use crate::utils::identifier::quote_ident;

/// Drops backup tables whose date suffix sorts below `today - retention_days`.
///
/// Only a failure to list the catalog is returned as an error. A table that
/// cannot be dropped is logged, recorded in the report, and skipped.
pub async fn sweep_expired_backups<C: Catalog>(
    catalog: &C,
    prefix: &str,
    retention_days: u32,
    today: NaiveDate,
    mode: RunMode,
) -> Result<PassReport> {
    let threshold = retention_threshold(today, retention_days);
    tracing::info!(%prefix, retention_days, %threshold, %mode, "Starting retention sweep");

    let backups = catalog
        .list_tables(prefix, Selection::Backups)
        .await
        .map_err(|source| AppError::Catalog {
            phase: Phase::Retention,
            source,
        })?;

    let expired: Vec<String> = backups
        .into_iter()
        .filter(|name| is_expired(name, &threshold))
        .collect();

    let mut report = PassReport::new(expired.clone());

    for table in expired {
        let source = original_table_name(prefix, &table).unwrap_or("?");
        if mode.is_dry_run() {
            tracing::info!(%table, %source, "Would drop expired backup table");
            continue;
        }
        match drop_table(catalog, &table).await {
            Ok(()) => {
                tracing::info!(%table, %source, "Dropped expired backup table");
                report.completed.push(table);
            }
            Err(e) => {
                tracing::error!(%table, error = %e, "Failed to drop backup table");
                report.failed.push((table, e.to_string()));
            }
        }
    }

    tracing::info!(
        candidates = report.candidates.len(),
        dropped = report.completed.len(),
        failed = report.failed.len(),
        "Retention sweep finished"
    );
    Ok(report)
}

async fn drop_table<C: Catalog>(catalog: &C, table: &str) -> Result<()> {
    let statement = format!("DROP TABLE IF EXISTS {}", quote_ident(table)?);
    catalog.execute(&statement).await?;
    Ok(())
}
