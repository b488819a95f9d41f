//! Mock Zephr admin server using wiremock for integration testing.
//!
//! Provides a configurable mock server simulating the user-export and
//! foreign-key-update endpoints, plus a matcher that fully verifies the
//! Blaize authorization header the way the real admin API would.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use zephr_client::auth::{sign_request, ZephrAuth, ZephrCredentials, AUTH_SCHEME};
use zephr_client::client::ZephrClient;

pub const TEST_ACCESS_KEY: &str = "test-access-key";
pub const TEST_SECRET_KEY: &str = "test-secret-key";

/// A mock Zephr admin server.
pub struct MockZephrServer {
    server: MockServer,
}

impl MockZephrServer {
    /// Create a new mock server.
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the base URI of the mock server.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Access the underlying wiremock server (for custom mounts and
    /// received-request inspection).
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Create a `ZephrClient` configured to talk to this mock server with
    /// the shared test credentials.
    pub fn client(&self) -> ZephrClient {
        let auth = ZephrAuth::new(ZephrCredentials {
            access_key: TEST_ACCESS_KEY.to_string(),
            secret_key: TEST_SECRET_KEY.to_string(),
        });
        ZephrClient::with_http_client(self.uri(), auth, reqwest::Client::new())
    }

    /// Path of the foreign-key update endpoint for one user.
    pub fn update_path(user_id: &str) -> String {
        format!("/v3/users/{user_id}/foreign-key/update/crmIdentifier")
    }

    // =========================================================================
    // User export mocks
    // =========================================================================

    /// Mount a mock serving the given export entries, requiring a valid
    /// signature over the export path.
    pub async fn mock_user_export(&self, entries: Value) {
        Mock::given(method("GET"))
            .and(path("/v3/user-export"))
            .and(query_param("attributes", "true"))
            .and(SignedAuthHeader::for_request("/v3/user-export", "GET", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(entries))
            .mount(&self.server)
            .await;
    }

    /// Mount an export mock answering with the given error status.
    pub async fn mock_user_export_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/v3/user-export"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // Foreign-key update mocks
    // =========================================================================

    /// Mount a successful update mock for one user, verifying the signed
    /// path and body, and require exactly one call.
    pub async fn mock_update_ok(&self, user_id: &str, value: &str) {
        let update_path = Self::update_path(user_id);
        Mock::given(method("PUT"))
            .and(path(update_path.as_str()))
            .and(SignedAuthHeader::for_request(&update_path, "PUT", value))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mount an update mock that fails with the given status; require
    /// exactly one call.
    pub async fn mock_update_error(&self, user_id: &str, status: u16) {
        Mock::given(method("PUT"))
            .and(path(Self::update_path(user_id).as_str()))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mount an update mock that must never be called.
    pub async fn mock_update_never(&self, user_id: &str) {
        Mock::given(method("PUT"))
            .and(path(Self::update_path(user_id).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}

/// Build one user-export entry in the wire shape.
pub fn export_entry(user_id: &str, email: &str, attributes: Value) -> Value {
    json!({
        "user": {
            "user_id": user_id,
            "identifiers": { "email_address": email },
            "attributes": attributes
        }
    })
}

/// Matcher that verifies the Blaize authorization header end-to-end:
/// scheme, access key, and a digest recomputed with the shared test
/// secret over the expected path, method, and body — exactly what the
/// remote verifier does.
pub struct SignedAuthHeader {
    path: String,
    method: String,
    body: String,
}

impl SignedAuthHeader {
    pub fn for_request(path: &str, method: &str, body: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            body: body.to_string(),
        }
    }
}

impl Match for SignedAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        let Some(header) = request.headers.get("Authorization") else {
            return false;
        };
        let Ok(value) = header.to_str() else {
            return false;
        };
        let Some(credential) = value.strip_prefix(&format!("{AUTH_SCHEME} ")) else {
            return false;
        };

        let parts: Vec<&str> = credential.split(':').collect();
        if parts.len() != 4 || parts[0] != TEST_ACCESS_KEY {
            return false;
        }
        let Ok(timestamp) = parts[1].parse::<i64>() else {
            return false;
        };

        match sign_request(
            TEST_SECRET_KEY,
            &self.path,
            &self.method,
            timestamp,
            parts[2],
            &self.body,
        ) {
            Ok(expected) => expected == parts[3],
            Err(_) => false,
        }
    }
}
