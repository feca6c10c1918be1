//! Detached review runs for the background delivery mode.

use relay_core::{ReviewPipeline, webhook::ReviewTarget};
use tokio::task::JoinHandle;

/// Runs the review pipeline on its own task after the delivery was acknowledged.
///
/// There is no caller left to report to, so the outcome only reaches the logs.
/// The handle is returned for tests; the server drops it.
pub fn spawn_review(pipeline: ReviewPipeline, target: ReviewTarget) -> JoinHandle<()> {
    tokio::spawn(async move {
        match pipeline.run(&target).await {
            Ok(outcome) => {
                tracing::debug!(
                    "Background review for {} finished (fallback: {})",
                    target,
                    outcome.used_fallback
                );
            }
            Err(e) => {
                tracing::error!("Error during background review of {}: {}", target, e);
            }
        }
    })
}
