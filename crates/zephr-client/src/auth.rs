//! Request signing for the Zephr admin API.
//!
//! Every outbound call carries a `BLAIZE-HMAC-SHA256` authorization header
//! with a digest over the request facts. The header embeds a per-call
//! timestamp and nonce, so a captured header cannot be replayed against
//! the remote verifier.

use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{ZephrClientError, ZephrClientResult};

/// Authorization scheme identifier expected by the Zephr admin API.
pub const AUTH_SCHEME: &str = "BLAIZE-HMAC-SHA256";

/// Access/secret key pair for one Zephr tenant.
///
/// The [`Debug`] impl redacts the secret key to prevent accidental
/// credential exposure in log output.
#[derive(Clone)]
pub struct ZephrCredentials {
    pub access_key: String,
    pub secret_key: String,
}

impl std::fmt::Debug for ZephrCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZephrCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Source of per-request nonce tokens.
///
/// Injectable so tests can substitute a deterministic source.
pub trait NonceSource: Send + Sync {
    fn nonce(&self) -> String;
}

/// Default nonce source: 128 bits from the operating system's CSPRNG,
/// hex-encoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomNonce;

impl NonceSource for OsRandomNonce {
    fn nonce(&self) -> String {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Compute the request digest for one Zephr admin call.
///
/// SHA-256 over the concatenation of secret key, body, path, method,
/// decimal timestamp, and nonce — in that exact order, with no
/// delimiters. The remote verifier recomputes the same concatenation;
/// reordering fields or inserting separators breaks verification.
/// Returns the lowercase hex encoding of the digest.
pub fn sign_request(
    secret_key: &str,
    path: &str,
    method: &str,
    timestamp_millis: i64,
    nonce: &str,
    body: &str,
) -> ZephrClientResult<String> {
    if secret_key.is_empty() {
        return Err(ZephrClientError::MissingSigningInput("secret key"));
    }
    if path.is_empty() {
        return Err(ZephrClientError::MissingSigningInput("request path"));
    }
    if method.is_empty() {
        return Err(ZephrClientError::MissingSigningInput("request method"));
    }
    if timestamp_millis == 0 {
        return Err(ZephrClientError::MissingSigningInput("signature timestamp"));
    }
    if nonce.is_empty() {
        return Err(ZephrClientError::MissingSigningInput("signature nonce"));
    }

    let mut hasher = Sha256::new();
    hasher.update(secret_key.as_bytes());
    hasher.update(body.as_bytes());
    hasher.update(path.as_bytes());
    hasher.update(method.as_bytes());
    hasher.update(timestamp_millis.to_string().as_bytes());
    hasher.update(nonce.as_bytes());

    Ok(hex::encode(hasher.finalize()))
}

/// Builds `Authorization` header values for Zephr admin calls.
pub struct ZephrAuth {
    credentials: ZephrCredentials,
    nonce_source: Box<dyn NonceSource>,
}

impl std::fmt::Debug for ZephrAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZephrAuth")
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl ZephrAuth {
    /// Create an auth handler with the default OS-random nonce source.
    #[must_use]
    pub fn new(credentials: ZephrCredentials) -> Self {
        Self::with_nonce_source(credentials, Box::new(OsRandomNonce))
    }

    /// Create an auth handler with a custom nonce source (for testing).
    #[must_use]
    pub fn with_nonce_source(
        credentials: ZephrCredentials,
        nonce_source: Box<dyn NonceSource>,
    ) -> Self {
        Self {
            credentials,
            nonce_source,
        }
    }

    /// Build the `Authorization` value for one outbound call.
    ///
    /// Draws a fresh timestamp and nonce on every invocation; the result
    /// must never be reused across requests.
    pub fn authorization_header(
        &self,
        path: &str,
        method: &str,
        body: &str,
    ) -> ZephrClientResult<String> {
        let timestamp = Utc::now().timestamp_millis();
        let nonce = self.nonce_source.nonce();
        self.header_at(path, method, body, timestamp, &nonce)
    }

    /// Build the header for an explicit timestamp and nonce.
    ///
    /// [`ZephrAuth::authorization_header`] delegates here; tests call it
    /// directly to get deterministic output.
    pub fn header_at(
        &self,
        path: &str,
        method: &str,
        body: &str,
        timestamp_millis: i64,
        nonce: &str,
    ) -> ZephrClientResult<String> {
        if self.credentials.access_key.is_empty() || self.credentials.secret_key.is_empty() {
            return Err(ZephrClientError::MissingCredentials);
        }

        let digest = sign_request(
            &self.credentials.secret_key,
            path,
            method,
            timestamp_millis,
            nonce,
            body,
        )?;

        Ok(format!(
            "{AUTH_SCHEME} {}:{timestamp_millis}:{nonce}:{digest}",
            self.credentials.access_key
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
