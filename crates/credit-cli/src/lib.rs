//! CLI library components for the credit risk scorer.

pub mod interactive;
pub mod logging;
pub mod session;
