//! Application state for the relay server.

use relay_core::{RelayConfig, ReviewPipeline};
use std::sync::Arc;

/// Shared application state. Read-only once the server is running.
#[derive(Clone)]
pub struct AppState {
    /// Relay configuration.
    pub config: Arc<RelayConfig>,
    /// Outbound clients for the fetch/review/post pipeline.
    pub pipeline: ReviewPipeline,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: RelayConfig, pipeline: ReviewPipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline,
        }
    }

    /// Builds the state and its HTTP clients from configuration.
    pub fn from_config(config: RelayConfig) -> relay_core::Result<Self> {
        let pipeline = ReviewPipeline::from_config(&config)?;
        Ok(Self::new(config, pipeline))
    }
}
