//! Batch synchronization of CRM identifiers into Zephr.
//!
//! Fetches the full user export once, filters to users carrying custom
//! attributes, then pushes each user's CRM identifier through one signed
//! update call. Individual update failures are recorded in the report and
//! never abort the run; only the initial fetch is fatal.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::ZephrClient;
use crate::error::ZephrClientResult;
use crate::models::UserRecord;

/// How many processed users between progress log lines.
const PROGRESS_LOG_INTERVAL: usize = 100;

/// Wall-clock window of one sync run, in milliseconds since epoch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

/// Completion report of one sync run.
///
/// Serializes to the report-file shape:
/// `{"time":{"start":..,"end":..},"userWithErrors":[..]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub time: TimeRange,

    /// Email addresses of users whose update call failed, in processing
    /// order.
    #[serde(rename = "userWithErrors")]
    pub user_with_errors: Vec<String>,
}

/// Drives one full foreign-key synchronization run.
pub struct SyncEngine {
    client: ZephrClient,
}

impl SyncEngine {
    /// Create a sync engine over the given client.
    #[must_use]
    pub fn new(client: ZephrClient) -> Self {
        Self { client }
    }

    /// Run the synchronization: one export fetch, then one signed update
    /// per remaining user, strictly sequential.
    ///
    /// # Errors
    ///
    /// Fails only if the initial user export cannot be fetched or decoded.
    /// Individual update failures are captured in the report's failure
    /// list and do **not** abort the run.
    pub async fn run(&self) -> ZephrClientResult<SyncReport> {
        let entries = self.client.export_users().await?;

        let users: Vec<UserRecord> = entries
            .into_iter()
            .map(|entry| entry.user)
            .filter(UserRecord::has_attributes)
            .collect();
        let total = users.len();

        info!(count = total, "Fetched all users");

        let mut report = SyncReport {
            time: TimeRange {
                start: Utc::now().timestamp_millis(),
                end: 0,
            },
            user_with_errors: Vec::new(),
        };

        for (index, user) in users.iter().enumerate() {
            if let Err(e) = self.sync_single_user(user).await {
                warn!(
                    user_id = %user.user_id,
                    email = %user.identifiers.email_address,
                    error = %e,
                    "Failed to update foreign key"
                );
                report
                    .user_with_errors
                    .push(user.identifiers.email_address.clone());
            }

            let processed = index + 1;
            if processed % PROGRESS_LOG_INTERVAL == 0 {
                info!("Processed users: {processed}/{total}");
            }
        }

        report.time.end = Utc::now().timestamp_millis();

        info!(
            processed = total,
            failed = report.user_with_errors.len(),
            "Foreign-key sync completed"
        );

        Ok(report)
    }

    /// Push one user's CRM identifier to the target.
    ///
    /// Returns a `Result` for the run loop to inspect; the caller decides
    /// whether a failure is recorded or propagated.
    async fn sync_single_user(&self, user: &UserRecord) -> ZephrClientResult<()> {
        self.client
            .update_foreign_key(&user.user_id, user.crm_identifier())
            .await
    }
}
