//! Common infrastructure shared by the credhash crates
//!
//! This crate provides:
//! - Structured logging setup and outcome logging that never exposes secrets
//! - Default `on_result` / `on_error` handlers for the builder APIs

#![forbid(unsafe_code)]

pub mod handlers;
pub mod logging;

pub use handlers::{on_error, on_result};
pub use logging::{CompareOutcome, LoggingTransformer};
