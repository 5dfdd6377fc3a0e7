//! Pipeline composition: wraps one handler service with all middleware layers.

use tower::util::BoxCloneService;
use tower::{Service, ServiceBuilder};
use ventaro_core::ResponseEnvelope;

use super::metrics::MetricsLayer;
use super::timeout::TimeoutLayer;
use crate::service::operation::{ApiCall, OperationError};

/// A type-erased, cloneable handler pipeline.
pub type HandlerPipeline = BoxCloneService<ApiCall, ResponseEnvelope, OperationError>;

/// Build a handler pipeline by wrapping `service` with middleware layers.
///
/// Layer order (outermost to innermost):
/// 1. `MetricsLayer` -- span, timing and outcome, including deadline expiry
/// 2. `TimeoutLayer` -- enforce the per-call deadline
#[must_use]
pub fn build_handler_pipeline<S>(service: S) -> HandlerPipeline
where
    S: Service<ApiCall, Response = ResponseEnvelope, Error = OperationError>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    BoxCloneService::new(
        ServiceBuilder::new()
            .layer(MetricsLayer)
            .layer(TimeoutLayer)
            .service(service),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
