//! Review Relay Core Library
//!
//! Webhook verification, payload parsing, and the outbound clients that turn a
//! pull-request event into a posted AI review comment.

pub mod config;
pub mod crypto;
pub mod error;
pub mod llm;
pub mod providers;
pub mod review;
pub mod webhook;

pub use config::{RelayConfig, ReviewMode};
pub use error::{RelayError, Result};
pub use review::{ReviewOutcome, ReviewPipeline};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
