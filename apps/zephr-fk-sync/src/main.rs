//! zephr-fk-sync — pushes each user's CRM identifier back into Zephr.
//!
//! One-shot batch job: fetches the full user export, filters to users
//! carrying custom attributes, issues one signed update call per user,
//! and writes a completion report listing the users whose update failed.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod report;

use config::AppConfig;
use error::CliResult;
use zephr_client::sync::SyncEngine;

/// Synchronize CRM identifier foreign keys into Zephr user records.
#[derive(Parser)]
#[command(name = "zephr-fk-sync", version, about)]
struct Cli {
    /// Write the completion report to this path (overrides ZEPHR_REPORT_PATH).
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,zephr_client=debug")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.report {
        config.report_path = path;
    }

    tracing::info!(admin_url = %config.admin_url, "starting foreign-key sync");

    let client =
        zephr_client::build_client(&config.admin_url, &config.access_key, &config.secret_key)?;
    let engine = SyncEngine::new(client);

    let report = engine.run().await?;

    report::write_report(&config.report_path, &report)?;
    tracing::info!(
        report = %config.report_path.display(),
        failed = report.user_with_errors.len(),
        "report written"
    );

    Ok(())
}
