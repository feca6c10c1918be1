//! Review relay server library.
//!
//! This library exposes the server components for use in integration tests.

pub mod cli;
pub mod error;
pub mod routes;
pub mod state;
pub mod worker;

pub use error::ApiError;
pub use routes::app_router;
pub use state::AppState;

// Re-export relay_core for convenience
pub use relay_core;

// Test utilities are available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
