//! Async comparison builder
//!
//! Usage: `Compare::new().on_result(on_result).compare(password, hash).await`
//! or `Compare::new().on_error(handler).compare(password, hash).await`

use crate::algorithms::{SaltedDigestValidator, SshaVariant};
use crate::scheme::SchemeTag;
use crate::{
    AsyncCompareResult, AsyncCompareResultWithError, AsyncCompareResultWithHandler, Comparator,
    CompareConfig, CompareError, Result,
};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::oneshot;
use zeroize::Zeroizing;

/// Comparison builder
#[derive(Debug, Clone, Default)]
pub struct CompareBuilder {
    comparator: Comparator,
    scheme: Option<SchemeTag>,
}

/// Comparison builder with error handler
pub struct CompareBuilderWithError<E> {
    inner: CompareBuilder,
    error_handler: E,
}

/// Comparison builder with result handler
pub struct CompareBuilderWithHandler<F, T> {
    inner: CompareBuilder,
    result_handler: F,
    _phantom: PhantomData<T>,
}

impl CompareBuilder {
    /// Create a builder with default ceilings and validators
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the resource ceilings
    #[must_use]
    pub fn with_config(mut self, config: CompareConfig) -> Self {
        self.comparator.set_config(config);
        self
    }

    /// Replace the validator for one SSHA variant
    #[must_use]
    pub fn with_salted_validator<V>(mut self, variant: SshaVariant, validator: V) -> Self
    where
        V: SaltedDigestValidator + 'static,
    {
        self.comparator.set_salted_validator(variant, Arc::new(validator));
        self
    }

    /// Force a scheme instead of classifying the hash
    #[must_use]
    pub fn scheme(mut self, scheme: SchemeTag) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Add `on_result` handler
    #[must_use]
    pub fn on_result<F, T>(self, handler: F) -> CompareBuilderWithHandler<F, T>
    where
        F: FnOnce(Result<()>) -> T + Send + Unpin + 'static,
        T: Send + 'static,
    {
        CompareBuilderWithHandler {
            inner: self,
            result_handler: handler,
            _phantom: PhantomData,
        }
    }

    /// Add `on_error` handler - transforms errors but passes through success
    #[must_use]
    pub fn on_error<E>(self, handler: E) -> CompareBuilderWithError<E>
    where
        E: Fn(CompareError) -> CompareError + Send + Sync + Unpin + 'static,
    {
        CompareBuilderWithError {
            inner: self,
            error_handler: handler,
        }
    }

    /// Compare on the blocking pool - action takes password and hash as arguments
    #[must_use]
    pub fn compare<P, H>(self, password: P, hash: H) -> AsyncCompareResult
    where
        P: Into<Vec<u8>>,
        H: Into<Vec<u8>>,
    {
        AsyncCompareResult::new(self.spawn(Zeroizing::new(password.into()), hash.into()))
    }

    fn spawn(self, password: Zeroizing<Vec<u8>>, hash: Vec<u8>) -> oneshot::Receiver<Result<()>> {
        let (tx, rx) = oneshot::channel();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("Comparison requested outside a Tokio runtime");
            let _ = tx.send(Err(CompareError::internal(
                "Comparison requires a running Tokio runtime",
            )));
            return rx;
        };

        let Self { comparator, scheme } = self;
        runtime.spawn_blocking(move || {
            let result = match scheme {
                Some(scheme) => comparator.compare_as(scheme, &password, &hash),
                None => comparator.compare(&password, &hash),
            };
            // The receiver may have been dropped; the result is discarded then
            let _ = tx.send(result);
        });

        rx
    }
}

impl<F, T> CompareBuilderWithHandler<F, T>
where
    F: FnOnce(Result<()>) -> T + Send + Unpin + 'static,
    T: Send + 'static,
{
    /// Compare on the blocking pool and resolve through the handler
    #[must_use]
    pub fn compare<P, H>(self, password: P, hash: H) -> AsyncCompareResultWithHandler<F>
    where
        P: Into<Vec<u8>>,
        H: Into<Vec<u8>>,
    {
        self.inner
            .compare(password, hash)
            .on_result(self.result_handler)
    }
}

impl<E> CompareBuilderWithError<E>
where
    E: Fn(CompareError) -> CompareError + Send + Sync + Unpin + 'static,
{
    /// Compare on the blocking pool, mapping any error through the handler
    #[must_use]
    pub fn compare<P, H>(self, password: P, hash: H) -> AsyncCompareResultWithError<E>
    where
        P: Into<Vec<u8>>,
        H: Into<Vec<u8>>,
    {
        let rx = self.inner.spawn(Zeroizing::new(password.into()), hash.into());
        AsyncCompareResultWithError::new(rx, self.error_handler)
    }
}
