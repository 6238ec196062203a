//! Authentication for the Listmonk REST API
//!
//! Listmonk API users authenticate with `Authorization: token <user>:<token>`.
//! The header is attached to every request through the client's default
//! headers and is marked sensitive so it never shows up in debug output.

use anyhow::{Context, Result};
use listmonk_core::ListmonkConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

/// User agent sent with every request
pub const CLIENT_USER_AGENT: &str = concat!("listmonk-mcp/", env!("CARGO_PKG_VERSION"));

/// Value of the `Authorization` header for an API user.
pub fn authorization_value(username: &str, api_token: &str) -> String {
    format!("token {}:{}", username, api_token)
}

/// Default headers for every Listmonk request.
pub fn default_headers(config: &ListmonkConfig) -> Result<HeaderMap> {
    let mut auth = HeaderValue::from_str(&authorization_value(
        &config.username,
        config.api_token(),
    ))
    .context("API credentials cannot be used in an HTTP header")?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    Ok(headers)
}
