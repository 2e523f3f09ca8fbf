//! Default handlers for the builder APIs
//!
//! These functions can be passed directly to `on_result` / `on_error`.

/// Default result handler: accept on success, reject on any error
///
/// Errors are logged at debug level so routine mismatches stay quiet.
pub fn on_result<E: std::fmt::Display>(result: Result<(), E>) -> bool {
    match result {
        Ok(()) => {
            tracing::debug!("Credential accepted");
            true
        }
        Err(e) => {
            tracing::debug!("Credential rejected: {e}");
            false
        }
    }
}

/// Default error handler that logs errors before passing them through
pub fn on_error<T: std::fmt::Debug>(error: T) -> T {
    tracing::warn!("Error occurred: {error:?}");
    error
}
