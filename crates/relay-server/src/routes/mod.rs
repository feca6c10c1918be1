//! HTTP route handlers.

pub mod health;
pub mod webhooks;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use relay_core::crypto::MAX_WEBHOOK_SIZE;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/version", get(health::version))
        .route("/webhook", post(webhooks::handle_github_webhook))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_WEBHOOK_SIZE)),
        )
        .with_state(state)
}
