//! Relay configuration loaded from the environment.
//!
//! The configuration is read once at startup and handed to the server as an
//! explicit value; nothing reads the environment while serving requests.

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;

use crate::error::{RelayError, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_LLM_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// How the webhook handler delivers the review relative to its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewMode {
    /// Acknowledge immediately and run the pipeline as a detached task.
    #[default]
    Background,
    /// Run the pipeline before responding and report failures as 500.
    Inline,
}

impl ReviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewMode::Background => "background",
            ReviewMode::Inline => "inline",
        }
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReviewMode {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "background" => Ok(ReviewMode::Background),
            "inline" => Ok(ReviewMode::Inline),
            other => Err(RelayError::Configuration(format!(
                "Invalid REVIEW_MODE '{}': expected 'background' or 'inline'",
                other
            ))),
        }
    }
}

/// Process-wide relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Shared secret for `X-Hub-Signature-256`. Without it every delivery is rejected.
    pub webhook_secret: Option<SecretString>,
    /// Token used for both the diff fetch and the comment post.
    pub github_token: SecretString,
    /// API key for the generation endpoint.
    pub llm_api_key: SecretString,
    pub host: String,
    pub port: u16,
    pub llm_model: String,
    pub llm_api_base: String,
    pub github_user_agent: String,
    pub review_mode: ReviewMode,
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let github_token = required_secret("GITHUB_TOKEN")?;
        let llm_api_key = required_secret("LLM_API_KEY")?;

        let webhook_secret = optional_var("WEBHOOK_SECRET").map(SecretString::from);

        let port = match optional_var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| RelayError::Configuration(format!("Invalid PORT '{}': {}", port, e)))?,
            None => DEFAULT_PORT,
        };

        let review_mode = match optional_var("REVIEW_MODE") {
            Some(mode) => mode.parse()?,
            None => ReviewMode::default(),
        };

        Ok(Self {
            webhook_secret,
            github_token,
            llm_api_key,
            host: optional_var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            llm_model: optional_var("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_api_base: optional_var("LLM_API_BASE")
                .unwrap_or_else(|| DEFAULT_LLM_API_BASE.to_string()),
            github_user_agent: optional_var("GITHUB_USER_AGENT")
                .unwrap_or_else(default_user_agent),
            review_mode,
        })
    }

    /// Socket address string to bind the HTTP listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn default_user_agent() -> String {
    format!("review-relay/{}", crate::VERSION)
}

/// Empty values count as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required_secret(name: &str) -> Result<SecretString> {
    optional_var(name)
        .map(SecretString::from)
        .ok_or_else(|| RelayError::Configuration(format!("{} is not set", name)))
}
