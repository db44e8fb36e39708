//! CLI command implementations.

pub mod classify;
pub mod providers;
pub mod resolve;
