//! Zephr admin API HTTP client (reqwest-based).
//!
//! Provides a `ZephrClient` that talks to the Zephr admin endpoints with a
//! signed authorization header on every call.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::ZephrAuth;
use crate::error::{ZephrClientError, ZephrClientResult};
use crate::models::{UserExportEntry, CRM_IDENTIFIER};

/// Path of the full user export. The query string requesting attribute
/// details is appended to the URL but is not part of the signed path.
const USER_EXPORT_PATH: &str = "/v3/user-export";

/// HTTP client for the Zephr admin API.
///
/// Wraps `reqwest::Client` with per-call request signing and error
/// mapping for the admin endpoints this tool consumes.
#[derive(Debug)]
pub struct ZephrClient {
    /// Base admin URL (e.g., "<https://tenant.api.zephr.com>").
    admin_url: String,
    /// Authorization header builder.
    auth: ZephrAuth,
    /// Underlying HTTP client.
    http_client: Client,
}

impl ZephrClient {
    /// Create a new Zephr client.
    pub fn new(admin_url: String, auth: ZephrAuth) -> ZephrClientResult<Self> {
        let http_client = Client::builder()
            .user_agent("zephr-fk-sync/0.1")
            .build()
            .map_err(|e| {
                ZephrClientError::InvalidConfig(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_http_client(admin_url, auth, http_client))
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(admin_url: String, auth: ZephrAuth, http_client: Client) -> Self {
        // Normalize base URL: strip trailing slash.
        let admin_url = admin_url.trim_end_matches('/').to_string();
        Self {
            admin_url,
            auth,
            http_client,
        }
    }

    /// Get the base admin URL.
    #[must_use]
    pub fn admin_url(&self) -> &str {
        &self.admin_url
    }

    /// Fetch the full user export with attribute details included
    /// (GET /v3/user-export?attributes=true).
    pub async fn export_users(&self) -> ZephrClientResult<Vec<UserExportEntry>> {
        let url = format!("{}{USER_EXPORT_PATH}?attributes=true", self.admin_url);
        debug!("Zephr GET {}", url);

        let header = self.auth.authorization_header(USER_EXPORT_PATH, "GET", "")?;
        let response = self
            .http_client
            .get(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("Authorization", header)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Update one user's CRM identifier foreign key
    /// (PUT /v3/users/:id/foreign-key/update/crmIdentifier).
    ///
    /// The signed path embeds the user id and must equal the transmitted
    /// path exactly; the body is the raw value string, signed and sent
    /// byte-identical.
    pub async fn update_foreign_key(&self, user_id: &str, value: &str) -> ZephrClientResult<()> {
        let path = format!("/v3/users/{user_id}/foreign-key/update/{CRM_IDENTIFIER}");
        let url = format!("{}{path}", self.admin_url);
        debug!("Zephr PUT {}", url);

        let header = self.auth.authorization_header(&path, "PUT", value)?;
        let response = self
            .http_client
            .put(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("Authorization", header)
            .body(value.to_string())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            self.handle_error_response(response).await
        }
    }

    // ── Response Handling ─────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ZephrClientResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| ZephrClientError::ParseError(format!("failed to parse response: {e}")))
        } else {
            self.handle_error_response(response).await
        }
    }

    async fn handle_error_response<T>(&self, response: reqwest::Response) -> ZephrClientResult<T> {
        let status = response.status();

        // Check for Retry-After header (rate limiting).
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        match status {
            StatusCode::NOT_FOUND => Err(ZephrClientError::NotFound(body)),
            StatusCode::TOO_MANY_REQUESTS => Err(ZephrClientError::RateLimited {
                retry_after_secs: retry_after,
            }),
            StatusCode::UNAUTHORIZED => Err(ZephrClientError::AuthError(format!(
                "authentication failed (401): {body}"
            ))),
            _ => {
                let detail = if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                };
                Err(ZephrClientError::ApiError {
                    status: status.as_u16(),
                    detail,
                })
            }
        }
    }
}
