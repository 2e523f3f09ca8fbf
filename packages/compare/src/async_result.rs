//! Futures returned by the async comparison builder

use crate::{CompareError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

const TASK_DROPPED: &str = "Comparison task dropped before completing";

/// Pending comparison result
pub struct AsyncCompareResult {
    receiver: oneshot::Receiver<Result<()>>,
}

/// Pending comparison result passed through a user handler
pub struct AsyncCompareResultWithHandler<F> {
    receiver: oneshot::Receiver<Result<()>>,
    handler: Option<F>,
}

/// Pending comparison result whose errors pass through a mapping handler
pub struct AsyncCompareResultWithError<E> {
    receiver: oneshot::Receiver<Result<()>>,
    error_handler: E,
}

impl AsyncCompareResult {
    pub(crate) fn new(receiver: oneshot::Receiver<Result<()>>) -> Self {
        Self { receiver }
    }

    /// Create an `AsyncCompareResult` that's already completed
    #[must_use]
    pub fn ready(result: Result<()>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { receiver: rx }
    }

    /// Resolve through `handler` instead of yielding the raw result
    pub fn on_result<F, T>(self, handler: F) -> AsyncCompareResultWithHandler<F>
    where
        F: FnOnce(Result<()>) -> T,
    {
        AsyncCompareResultWithHandler {
            receiver: self.receiver,
            handler: Some(handler),
        }
    }
}

impl Future for AsyncCompareResult {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(CompareError::internal(TASK_DROPPED))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<F, T> Future for AsyncCompareResultWithHandler<F>
where
    F: FnOnce(Result<()>) -> T + Unpin,
{
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        // Polling again after completion is a caller bug; stay pending
        if this.handler.is_none() {
            return Poll::Pending;
        }

        let result = match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => result,
            Poll::Ready(Err(_)) => Err(CompareError::internal(TASK_DROPPED)),
            Poll::Pending => return Poll::Pending,
        };

        match this.handler.take() {
            Some(handler) => Poll::Ready(handler(result)),
            None => Poll::Pending,
        }
    }
}

impl<E> AsyncCompareResultWithError<E> {
    pub(crate) fn new(receiver: oneshot::Receiver<Result<()>>, error_handler: E) -> Self {
        Self {
            receiver,
            error_handler,
        }
    }
}

impl<E> Future for AsyncCompareResultWithError<E>
where
    E: Fn(CompareError) -> CompareError + Unpin,
{
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(Ok(()))) => Poll::Ready(Ok(())),
            Poll::Ready(Ok(Err(e))) => Poll::Ready(Err((this.error_handler)(e))),
            Poll::Ready(Err(_)) => Poll::Ready(Err((this.error_handler)(CompareError::internal(
                TASK_DROPPED,
            )))),
            Poll::Pending => Poll::Pending,
        }
    }
}
