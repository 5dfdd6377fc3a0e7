//! Domain request handlers.
//!
//! Each handler implements [`ApiHandler`]; wrapping it in an `Arc` turns it
//! into a `tower::Service<ApiCall>` whose `call` is the handler fault
//! boundary: every `HandlerError` is logged and converted into the handler's
//! response envelope there, so only pipeline failures (deadline expiry)
//! reach the router as `OperationError`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use tower::Service;
use tracing::{error, info};
use ventaro_core::fields::display_value;
use ventaro_core::ResponseEnvelope;

use crate::service::operation::{ApiCall, HandlerError, OperationError};

pub mod ai;
pub mod analytics;
pub mod edge;
pub mod health;
pub mod iot;
pub mod user;

pub use ai::AiHandler;
pub use analytics::AnalyticsHandler;
pub use edge::EdgeHandler;
pub use health::HealthHandler;
pub use iot::IotHandler;
pub use user::UserHandler;

// ---------------------------------------------------------------------------
// ApiHandler
// ---------------------------------------------------------------------------

/// A request handler for one route prefix.
#[async_trait]
pub trait ApiHandler: Send + Sync {
    /// Handler name, matching one of `handler_names`.
    fn name(&self) -> &'static str;

    /// Generic message used in place of unexpected faults.
    fn fault_message(&self) -> &'static str;

    async fn handle(&self, call: &ApiCall) -> Result<ResponseEnvelope, HandlerError>;
}

impl<H> Service<ApiCall> for Arc<H>
where
    H: ApiHandler + 'static,
{
    type Response = ResponseEnvelope;
    type Error = OperationError;
    type Future = Pin<Box<dyn Future<Output = Result<ResponseEnvelope, OperationError>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, call: ApiCall) -> Self::Future {
        let handler = Arc::clone(self);
        Box::pin(async move {
            match handler.handle(&call).await {
                Ok(envelope) => Ok(envelope),
                Err(err) => {
                    match &err {
                        HandlerError::Rejected { status, message } => {
                            info!(handler = handler.name(), call_id = call.ctx.call_id, status, message, "request rejected");
                        }
                        _ => {
                            error!(handler = handler.name(), call_id = call.ctx.call_id, error = %err, "error handling request");
                        }
                    }
                    Ok(err.into_envelope(handler.fault_message()))
                }
            }
        })
    }
}

/// Builds a metric name parameterized by a payload value, e.g.
/// `AnalyticsEvent_click`.
pub(crate) fn parameterized_metric(prefix: &str, value: &serde_json::Value) -> String {
    format!("{prefix}_{}", display_value(value))
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use serde_json::Value;
    use ventaro_core::keys::params;
    use ventaro_core::{FixedClock, HttpMethod, Timestamp};

    use crate::adapters::{
        RecordingMessagingSink, RecordingMetricsSink, RecordingNotificationSink,
        StaticParameterStore,
    };
    use crate::service::config::ProcessorConfig;
    use crate::service::operation::{ApiCall, CallContext};
    use crate::service::outbound::{Collaborators, Outbound};

    pub const NOW_SECS: i64 = 1_714_566_645;

    pub struct Fixture {
        pub outbound: Outbound,
        pub parameters: Arc<StaticParameterStore>,
        pub messaging: Arc<RecordingMessagingSink>,
        pub notifications: Arc<RecordingNotificationSink>,
        pub metrics: Arc<RecordingMetricsSink>,
    }

    impl Fixture {
        pub fn metric_names(&self) -> Vec<String> {
            self.metrics.recorded().into_iter().map(|d| d.name).collect()
        }

        pub fn sink_calls(&self) -> usize {
            self.messaging.count() + self.notifications.count() + self.metrics.count()
        }
    }

    /// Every queue and topic key resolves to `queue://<key>`.
    pub fn make_fixture() -> Fixture {
        let mut store = StaticParameterStore::new();
        for key in params::ALL {
            store = store.with_parameter(key, format!("queue://{key}"));
        }
        make_fixture_with(store)
    }

    pub fn make_fixture_with(store: StaticParameterStore) -> Fixture {
        let parameters = Arc::new(store);
        let messaging = Arc::new(RecordingMessagingSink::new());
        let notifications = Arc::new(RecordingNotificationSink::new());
        let metrics = Arc::new(RecordingMetricsSink::new());
        let collaborators = Collaborators::new(
            parameters.clone(),
            messaging.clone(),
            notifications.clone(),
            metrics.clone(),
        )
        .with_clock(Arc::new(FixedClock(now())));
        Fixture {
            outbound: Outbound::new(collaborators, Arc::new(ProcessorConfig::default())),
            parameters,
            messaging,
            notifications,
            metrics,
        }
    }

    pub fn now() -> Timestamp {
        Timestamp::from_unix_secs(NOW_SECS).unwrap_or_else(Timestamp::now)
    }

    pub fn make_call(handler: &'static str, method: HttpMethod, payload: Value) -> ApiCall {
        ApiCall {
            ctx: CallContext {
                call_id: 7,
                handler,
                received_at: now(),
                timeout_ms: 0,
            },
            method,
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
