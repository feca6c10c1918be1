//! GitHub API client for pull-request diffs and issue comments.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use url::Url;

use crate::error::{RelayError, Result};

/// Media type that makes GitHub return a pull request as a unified diff.
pub const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
/// Media type for regular JSON API calls.
pub const JSON_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Banner placed above every posted review.
pub const REVIEW_BANNER: &str = "🤖 **AI Review:**";

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

/// Wraps review text in the markdown posted to the pull request.
pub fn format_review_comment(review: &str) -> String {
    format!("{}\n{}", REVIEW_BANNER, review)
}

/// GitHub API client authenticated with a personal or installation token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: SecretString,
}

impl GitHubClient {
    pub fn new(client: reqwest::Client, token: SecretString) -> Self {
        Self { client, token }
    }

    fn authorization(&self) -> String {
        format!("token {}", self.token.expose_secret())
    }

    /// Fetches the raw unified diff of a pull request.
    pub async fn fetch_diff(&self, diff_url: &Url) -> Result<String> {
        let response = self
            .client
            .get(diff_url.clone())
            .header(AUTHORIZATION, self.authorization())
            .header(ACCEPT, DIFF_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| RelayError::DiffFetch(format!("GitHub request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::DiffFetch(format!(
                "GitHub API error {}: {}",
                status, body
            )));
        }

        response
            .text()
            .await
            .map_err(|e| RelayError::DiffFetch(format!("Failed to read diff body: {}", e)))
    }

    /// Posts `body` as a markdown comment to an issue comments URL.
    pub async fn post_comment(&self, comments_url: &Url, body: &str) -> Result<()> {
        let response = self
            .client
            .post(comments_url.clone())
            .header(AUTHORIZATION, self.authorization())
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .json(&CommentRequest { body })
            .send()
            .await
            .map_err(|e| RelayError::CommentPost(format!("GitHub request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::CommentPost(format!(
                "GitHub API error {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
