//! Review generation through a hosted language model.

pub mod gemini;

pub use gemini::*;
