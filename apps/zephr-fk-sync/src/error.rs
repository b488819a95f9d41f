//! CLI error types and exit codes

use thiserror::Error;
use zephr_client::ZephrClientError;

use crate::config::ConfigError;

/// Exit codes:
/// - 0: success (per-user failures are reported in the output file, not fatal)
/// - 1: configuration error
/// - 2: sync run failed before completion
/// - 3: report could not be written
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("sync run failed: {0}")]
    Sync(#[from] ZephrClientError),

    #[error("failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    ReportWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 1,
            CliError::Sync(_) => 2,
            CliError::ReportSerialize(_) | CliError::ReportWrite { .. } => 3,
        }
    }
}
