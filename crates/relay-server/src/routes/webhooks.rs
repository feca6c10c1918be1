//! GitHub pull-request webhook endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use relay_core::{
    ReviewMode,
    webhook::{SIGNATURE_HEADER, parse_pull_request_event, verify_request},
};

use crate::error::ApiError;
use crate::state::AppState;
use crate::worker::spawn_review;

pub const IGNORED_MESSAGE: &str = "Event ignored";
pub const ACCEPTED_MESSAGE: &str = "Processing in background";
pub const POSTED_MESSAGE: &str = "Review posted";

/// Handler for GitHub webhooks.
///
/// POST /webhook
pub async fn handle_github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), ApiError> {
    // 1. Verify signature over the raw bytes before trusting anything in them
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    if let Err(e) = verify_request(state.config.webhook_secret.as_ref(), signature, &body) {
        tracing::warn!("Rejected webhook delivery: {}", e);
        return Err(e.into());
    }

    // 2. Parse and filter by action
    let event = parse_pull_request_event(&body).inspect_err(|e| {
        tracing::warn!("{}", e);
    })?;

    let action = event.review_action();
    if !action.is_reviewable() {
        tracing::info!("Ignoring event: {}", action);
        return Ok((StatusCode::OK, IGNORED_MESSAGE));
    }

    let target = event.into_target().inspect_err(|e| {
        tracing::warn!("{}", e);
    })?;
    tracing::info!("Received {} event for {}", action, target);

    // 3. Run the pipeline, detached or inline
    match state.config.review_mode {
        ReviewMode::Background => {
            spawn_review(state.pipeline.clone(), target);
            Ok((StatusCode::OK, ACCEPTED_MESSAGE))
        }
        ReviewMode::Inline => match state.pipeline.run(&target).await {
            Ok(_) => Ok((StatusCode::OK, POSTED_MESSAGE)),
            Err(e) => {
                tracing::error!("Error during processing of {}: {}", target, e);
                Err(e.into())
            }
        },
    }
}
