//! Test utilities for relay-server integration tests.

use axum::Router;
use relay_core::{
    RelayConfig, ReviewMode, ReviewPipeline,
    config::{DEFAULT_LLM_MODEL, default_user_agent},
    crypto::github_signature,
};
use secrecy::SecretString;

use crate::routes::app_router;
use crate::state::AppState;

/// Webhook secret used in all tests.
pub const TEST_WEBHOOK_SECRET: &str = "test-webhook-secret";
pub const TEST_GITHUB_TOKEN: &str = "ghp_test_token";
pub const TEST_LLM_API_KEY: &str = "test-llm-key";

/// Builds a configuration pointing the model client at `llm_api_base`.
///
/// GitHub URLs come from the event payload, so tests point those at a mock
/// server through the payload itself.
pub fn test_config(llm_api_base: &str, review_mode: ReviewMode) -> RelayConfig {
    RelayConfig {
        webhook_secret: Some(SecretString::from(TEST_WEBHOOK_SECRET)),
        github_token: SecretString::from(TEST_GITHUB_TOKEN),
        llm_api_key: SecretString::from(TEST_LLM_API_KEY),
        host: "127.0.0.1".to_string(),
        port: 0,
        llm_model: DEFAULT_LLM_MODEL.to_string(),
        llm_api_base: llm_api_base.to_string(),
        github_user_agent: default_user_agent(),
        review_mode,
    }
}

/// Creates application state for a configuration.
pub fn setup_test_state(config: RelayConfig) -> AppState {
    let pipeline = ReviewPipeline::from_config(&config).expect("Failed to build test pipeline");
    AppState::new(config, pipeline)
}

/// Creates the full application router for testing.
pub fn create_test_app(config: RelayConfig) -> Router {
    app_router(setup_test_state(config))
}

/// Signature header value for `body` under [`TEST_WEBHOOK_SECRET`].
pub fn sign(body: &[u8]) -> String {
    github_signature(TEST_WEBHOOK_SECRET, body)
}
