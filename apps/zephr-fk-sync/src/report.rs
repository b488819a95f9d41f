//! Report sink: one best-effort JSON write at run completion.

use std::fs;
use std::path::Path;

use zephr_client::sync::SyncReport;

use crate::error::{CliError, CliResult};

/// Serialize the report and write it to `path` in a single operation.
///
/// No partial or incremental persistence: either the whole report lands
/// on disk or the error propagates to the caller.
pub fn write_report(path: &Path, report: &SyncReport) -> CliResult<()> {
    let json = serde_json::to_string(report)?;
    fs::write(path, json).map_err(|e| CliError::ReportWrite {
        path: path.display().to_string(),
        source: e,
    })
}
