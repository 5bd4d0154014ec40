// autobackup/src/utils/setting.rs
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Opens the single connection used for the whole run and checks it answers.
///
/// The pool is capped at one connection: every statement of a run goes over
/// the same session, one after another.
pub async fn connect(db_url: &str, display_target: &str) -> Result<PgPool> {
    tracing::info!(target_db = %display_target, "Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(db_url)
        .await
        .with_context(|| format!("Failed to connect to {}", display_target))?;

    check_db_connection(&pool)
        .await
        .with_context(|| format!("Connection check failed for {}", display_target))?;

    tracing::info!(target_db = %display_target, "Successfully connected");
    Ok(pool)
}

/// Round-trips a trivial query over the pool.
pub async fn check_db_connection(pool: &PgPool) -> Result<()> {
    let one: i32 = sqlx::query_scalar("SELECT 1")
        .fetch_one(pool)
        .await
        .context("SELECT 1 did not succeed")?;
    anyhow::ensure!(one == 1, "unexpected answer to SELECT 1: {}", one);
    Ok(())
}
