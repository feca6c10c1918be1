//! Background work that outlives the webhook response.

pub mod review_task;

pub use review_task::*;
