//! Mapping from relay errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::RelayError;
use serde_json::json;

/// A [`RelayError`] surfaced to the webhook sender.
#[derive(Debug)]
pub struct ApiError(pub RelayError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RelayError::Authentication(_) => StatusCode::UNAUTHORIZED,
            RelayError::InvalidWebhookPayload(_) => StatusCode::BAD_REQUEST,
            RelayError::DiffFetch(_)
            | RelayError::Generation(_)
            | RelayError::CommentPost(_)
            | RelayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Only payload errors describe themselves. Auth reasons and upstream
        // response bodies stay in the server log.
        let message = match &self.0 {
            RelayError::Authentication(_) => "Invalid signature".to_string(),
            RelayError::InvalidWebhookPayload(_) => self.0.to_string(),
            RelayError::DiffFetch(_) => "Diff fetch failed".to_string(),
            RelayError::Generation(_) => "Review generation failed".to_string(),
            RelayError::CommentPost(_) => "Comment post failed".to_string(),
            RelayError::Configuration(_) => "Internal server error".to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
