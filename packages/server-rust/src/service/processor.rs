//! Entry point: classifies a raw payload and runs it through the request or
//! event router.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::{json, Value};
use tracing::{error, info, warn};
use ventaro_core::{EventOutcome, FaultResponse, InvocationOutput, ResponseEnvelope};

use super::classify::InvocationService;
use super::config::ProcessorConfig;
use super::domain::{
    AiHandler, AnalyticsHandler, EdgeHandler, HealthHandler, IotHandler, UserHandler,
};
use super::events::EventRouter;
use super::middleware::build_handler_pipeline;
use super::operation::{handler_names, ClassifyError, Invocation};
use super::outbound::{Collaborators, Outbound};
use super::router::{RequestRouter, ROUTE_PREFIXES};

/// The API processor. One instance serves every invocation of the process.
pub struct Processor {
    classifier: InvocationService,
    requests: RequestRouter,
    events: EventRouter,
}

impl Processor {
    /// Wire the routers and handlers around the given collaborators.
    #[must_use]
    pub fn new(config: ProcessorConfig, collaborators: Collaborators) -> Self {
        let config = Arc::new(config);
        let classifier = InvocationService::new(Arc::clone(&collaborators.clock));
        let outbound = Outbound::new(collaborators, Arc::clone(&config));

        let mut requests = RequestRouter::new(config.handler_timeout_ms);
        let [health, ai, user, analytics, iot, edge] = ROUTE_PREFIXES;
        requests.register(
            health,
            handler_names::HEALTH,
            build_handler_pipeline(Arc::new(HealthHandler::new(outbound.clone()))),
        );
        requests.register(
            ai,
            handler_names::AI,
            build_handler_pipeline(Arc::new(AiHandler::new(outbound.clone()))),
        );
        requests.register(
            user,
            handler_names::USER,
            build_handler_pipeline(Arc::new(UserHandler::new(outbound.clone()))),
        );
        requests.register(
            analytics,
            handler_names::ANALYTICS,
            build_handler_pipeline(Arc::new(AnalyticsHandler::new(outbound.clone()))),
        );
        requests.register(
            iot,
            handler_names::IOT,
            build_handler_pipeline(Arc::new(IotHandler::new(outbound.clone()))),
        );
        requests.register(
            edge,
            handler_names::EDGE,
            build_handler_pipeline(Arc::new(EdgeHandler::new(outbound.clone()))),
        );

        Self {
            classifier,
            requests,
            events: EventRouter::new(outbound),
        }
    }

    /// Handle one raw payload. Never fails: panics below this point are
    /// caught and reported as 500 `Internal server error`.
    pub async fn handle(&self, payload: Value) -> InvocationOutput {
        let rendered = payload.to_string();
        info!(payload = %rendered, "received payload");

        AssertUnwindSafe(self.process(payload, &rendered))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                error!("unhandled panic while processing payload");
                FaultResponse::internal().into()
            })
    }

    /// Like [`handle`](Self::handle), returning the JSON wire form.
    pub async fn handle_json(&self, payload: Value) -> Value {
        let output = self.handle(payload).await;
        serde_json::to_value(&output).unwrap_or_else(|err| {
            error!(error = %err, "failed to serialize invocation output");
            json!({ "statusCode": 500, "body": FaultResponse::internal().body })
        })
    }

    async fn process(&self, payload: Value, rendered: &str) -> InvocationOutput {
        match self.classifier.classify(payload) {
            Ok(Invocation::Request { ctx, request }) => self.requests.dispatch(ctx, request).await.into(),
            Ok(Invocation::Event { ctx, event }) => self.events.dispatch(ctx, &event).await.into(),
            Err(ClassifyError::UnknownPayload) => {
                warn!(payload = %rendered, "unknown event type");
                FaultResponse::unknown_payload().into()
            }
            Err(err @ ClassifyError::MalformedRequest(_)) => {
                error!(error = %err, "error processing API request");
                ResponseEnvelope::error(500, "Internal server error").into()
            }
            Err(err @ ClassifyError::MalformedEvent(_)) => {
                error!(error = %err, "error processing event");
                EventOutcome::new(500, "Event processing error").into()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
