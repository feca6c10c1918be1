//! Liveness and version endpoints.

use axum::{Json, response::IntoResponse};
use serde::Serialize;

pub const ROOT_MESSAGE: &str = "Review relay is healthy";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
    name: &'static str,
}

/// GET /
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// GET /version
pub async fn version() -> impl IntoResponse {
    Json(VersionResponse {
        version: relay_core::VERSION,
        name: "relayd",
    })
}
