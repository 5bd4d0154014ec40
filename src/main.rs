//! Table-level backup tool
//!
//! Snapshots every table of the `public` schema into `{prefix}_{table}_{YYYYMMDD}`
//! and drops snapshots older than the retention window. Dry-run unless `--run`.

// autobackup/src/main.rs
mod backup;
mod catalog;
mod config;
mod errors;
mod utils;

use anyhow::{Context, Result};
use backup::RunMode;
use config::AppConfig;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_PATH: &str = "config.json";
const CONFIG_PATH_ENV: &str = "AUTOBACKUP_CONFIG";
const USAGE: &str = "usage: autobackup [--run] [--config <path>] [--help]";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    run: bool,
    help: bool,
    config_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autobackup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };
    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run_app(args).await {
        Ok(()) => {
            tracing::info!("backup done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_app(args: CliArgs) -> Result<()> {
    let config_path = args
        .config_path
        .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let app_config = AppConfig::load_from_json(&config_path).context(format!(
        "Failed to load application configuration from {}",
        config_path.display()
    ))?;

    let mode = RunMode::from_flag(args.run);
    if mode.is_dry_run() {
        tracing::info!("Dry run: no tables will be dropped or created, pass --run to apply");
    }

    let report = backup::run_backup_flow(&app_config, mode)
        .await
        .context("Backup process failed")?;

    tracing::info!(
        expired = report.retention.candidates.len(),
        sources = report.snapshot.candidates.len(),
        soft_failures = report.soft_failures(),
        "Run summary"
    );
    Ok(())
}

fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs {
        run: false,
        help: false,
        config_path: None,
    };
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--run" | "-run" => parsed.run = true,
            "--config" | "-c" => {
                let path = args
                    .next()
                    .with_context(|| format!("--config needs a path\n{}", USAGE))?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => parsed.help = true,
            other => anyhow::bail!("Unknown argument: {}\n{}", other, USAGE),
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_to_dry_run() -> anyhow::Result<()> {
        let parsed = parse_args(args(&[]))?;
        assert_eq!(
            parsed,
            CliArgs {
                run: false,
                help: false,
                config_path: None
            }
        );
        Ok(())
    }

    #[test]
    fn test_run_and_config() -> anyhow::Result<()> {
        let parsed = parse_args(args(&["--config", "/etc/autobackup.json", "--run"]))?;
        assert!(parsed.run);
        assert_eq!(parsed.config_path, Some(PathBuf::from("/etc/autobackup.json")));
        // Single-dash spelling is accepted too.
        assert!(parse_args(args(&["-run"]))?.run);
        Ok(())
    }

    #[test]
    fn test_help_is_not_an_error() -> anyhow::Result<()> {
        let parsed = parse_args(args(&["--help"]))?;
        assert!(parsed.help);
        assert!(!parsed.run);
        assert!(parse_args(args(&["--run", "-h"]))?.help);
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_and_incomplete() {
        assert!(parse_args(args(&["--force"])).is_err());
        assert!(parse_args(args(&["--config"])).is_err());
    }
}
