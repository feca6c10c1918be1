//! Source-control provider integrations.

pub mod github;

pub use github::*;

use crate::error::{RelayError, Result};

/// HTTP client shared by the GitHub and Gemini clients.
pub type HttpClient = reqwest::Client;

/// Builds the HTTP client shared by every outbound call.
///
/// No request timeout is set; calls rely on reqwest's defaults.
pub fn build_http_client(user_agent: &str) -> Result<HttpClient> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|e| RelayError::Configuration(format!("Failed to create HTTP client: {}", e)))
}
