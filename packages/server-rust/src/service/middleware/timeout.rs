//! Deadline middleware for request-handler calls.
//!
//! Fails calls that exceed their `timeout_ms` with `OperationError::Timeout`.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tower::{Layer, Service};
use ventaro_core::ResponseEnvelope;

use crate::service::operation::{ApiCall, OperationError};

// ---------------------------------------------------------------------------
// TimeoutLayer
// ---------------------------------------------------------------------------

/// Tower layer that wraps handler services with a per-call deadline.
///
/// The deadline is read from each call's `ctx.timeout_ms`; 0 runs the call
/// without one.
#[derive(Debug, Clone)]
pub struct TimeoutLayer;

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService { inner }
    }
}

// ---------------------------------------------------------------------------
// TimeoutService
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TimeoutService<S> {
    inner: S,
}

impl<S> Service<ApiCall> for TimeoutService<S>
where
    S: Service<ApiCall, Response = ResponseEnvelope, Error = OperationError> + Send,
    S::Future: Send + 'static,
{
    type Response = ResponseEnvelope;
    type Error = OperationError;
    type Future = Pin<Box<dyn Future<Output = Result<ResponseEnvelope, OperationError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, call: ApiCall) -> Self::Future {
        let timeout_ms = call.ctx().timeout_ms;
        let fut = self.inner.call(call);
        if timeout_ms == 0 {
            return Box::pin(fut);
        }
        Box::pin(async move {
            let duration = Duration::from_millis(timeout_ms);
            match tokio::time::timeout(duration, fut).await {
                Ok(result) => result,
                Err(_elapsed) => Err(OperationError::Timeout { timeout_ms }),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
