//! Client library for the Zephr identity platform admin API.
//!
//! Covers request signing ([`auth`]), the signed HTTP surface
//! ([`client`]), the user-export wire models ([`models`]), and the batch
//! foreign-key sync engine ([`sync`]).

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod sync;

pub use error::{ZephrClientError, ZephrClientResult};

use auth::{ZephrAuth, ZephrCredentials};

/// Build a [`client::ZephrClient`] from connection settings.
///
/// This is the single shared helper used by the binary and the tests to
/// avoid duplicating client construction logic.
pub fn build_client(
    admin_url: &str,
    access_key: &str,
    secret_key: &str,
) -> ZephrClientResult<client::ZephrClient> {
    let credentials = ZephrCredentials {
        access_key: access_key.to_string(),
        secret_key: secret_key.to_string(),
    };
    let auth = ZephrAuth::new(credentials);
    client::ZephrClient::new(admin_url.to_string(), auth)
}
