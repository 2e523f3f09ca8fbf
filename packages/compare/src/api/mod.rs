//! Fluent async comparison API
//!
//! Actions take data as arguments:
//! `Compare::new().on_result(handler).compare(password, hash).await`

pub mod compare_builder;

pub use compare_builder::{CompareBuilder, CompareBuilderWithError, CompareBuilderWithHandler};

/// Entry point for async comparisons
pub struct Compare;

impl Compare {
    /// Start a comparison with default ceilings and validators
    #[allow(clippy::new_ret_no_self)]
    #[must_use]
    pub fn new() -> CompareBuilder {
        CompareBuilder::new()
    }
}
