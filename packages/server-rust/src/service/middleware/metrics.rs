//! Instrumentation middleware for request-handler calls.
//!
//! Opens a `tracing` span per call and records duration and outcome on it,
//! then reports the same figures through the `metrics` facade.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{info_span, Instrument};
use ventaro_core::ResponseEnvelope;

use crate::service::operation::{ApiCall, OperationError};

// ---------------------------------------------------------------------------
// MetricsLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments handler calls with timing and outcome.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

// ---------------------------------------------------------------------------
// MetricsService
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

/// Outcome label: `ok` for 2xx, `rejected` for 4xx, `failed` for 5xx or a
/// service error.
fn outcome_of(result: &Result<ResponseEnvelope, OperationError>) -> &'static str {
    match result {
        Ok(envelope) if envelope.status_code < 400 => "ok",
        Ok(envelope) if envelope.status_code < 500 => "rejected",
        Ok(_) | Err(_) => "failed",
    }
}

impl<S> Service<ApiCall> for MetricsService<S>
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
        let handler = call.ctx().handler;
        let call_id = call.ctx().call_id;
        let received_at = call.ctx().received_at.to_iso();

        let span = info_span!(
            "handler",
            handler = handler,
            call_id = call_id,
            received_at = %received_at,
            duration_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        let fut = self.inner.call(call);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = fut.await;
                let elapsed = start.elapsed();
                let outcome = outcome_of(&result);

                #[allow(clippy::cast_possible_truncation)]
                let duration_ms = elapsed.as_millis() as u64;
                tracing::Span::current().record("duration_ms", duration_ms);
                tracing::Span::current().record("outcome", outcome);

                ::metrics::counter!("ventaro_handler_calls_total", "handler" => handler, "outcome" => outcome)
                    .increment(1);
                ::metrics::histogram!("ventaro_handler_duration_seconds", "handler" => handler)
                    .record(elapsed.as_secs_f64());

                tracing::info!(
                    handler = handler,
                    call_id = call_id,
                    duration_ms = duration_ms,
                    outcome = outcome,
                    "handler call complete"
                );

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
