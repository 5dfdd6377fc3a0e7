//! AI handler: queues a prompt for the AI worker.

use async_trait::async_trait;
use serde_json::json;
use ventaro_core::fields::{optional, required};
use ventaro_core::keys::params;
use ventaro_core::{AiProcessingRequest, DomainMessage, ResponseEnvelope};

use super::ApiHandler;
use crate::service::operation::{handler_names, ApiCall, HandlerError};
use crate::service::outbound::Outbound;

const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_MAX_TOKENS: u64 = 1000;

pub struct AiHandler {
    outbound: Outbound,
}

impl AiHandler {
    #[must_use]
    pub fn new(outbound: Outbound) -> Self {
        Self { outbound }
    }
}

#[async_trait]
impl ApiHandler for AiHandler {
    fn name(&self) -> &'static str {
        handler_names::AI
    }

    fn fault_message(&self) -> &'static str {
        "AI processing error"
    }

    async fn handle(&self, call: &ApiCall) -> Result<ResponseEnvelope, HandlerError> {
        let fields = call.fields()?;
        let prompt = required(fields, "prompt")
            .cloned()
            .ok_or(HandlerError::bad_request("Prompt is required"))?;

        // The id and the timestamp share one clock reading.
        let now = self.outbound.clock().now();
        let request = AiProcessingRequest {
            model_type: optional(fields, "model_type", json!(DEFAULT_MODEL)),
            prompt,
            max_tokens: optional(fields, "max_tokens", json!(DEFAULT_MAX_TOKENS)),
            timestamp: now.to_iso(),
            request_id: AiProcessingRequest::request_id_for(now),
        };
        let request_id = request.request_id.clone();

        if !self
            .outbound
            .enqueue(params::AI_PROCESSING_QUEUE, &DomainMessage::AiProcessing(request))
            .await
        {
            return Err(HandlerError::Dependency {
                message: "Failed to queue AI request",
            });
        }

        self.outbound.put_metric("AIRequestsQueued", 1.0).await;
        Ok(ResponseEnvelope::json(
            202,
            &json!({
                "message": "AI request queued for processing",
                "request_id": request_id,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use ventaro_core::HttpMethod;

    use super::*;
    use crate::service::domain::test_support::{make_call, make_fixture, Fixture};

    async fn run(payload: Value) -> (ResponseEnvelope, Fixture) {
        let fx = make_fixture();
        let handler = AiHandler::new(fx.outbound.clone());
        let resp = handler
            .handle(&make_call(handler_names::AI, HttpMethod::Post, payload))
            .await
            .unwrap_or_else(|err| err.into_envelope("AI processing error"));
        (resp, fx)
    }

    #[tokio::test]
    async fn queues_prompt_with_defaults() {
        let (resp, fx) = run(json!({ "prompt": "hi" })).await;

        assert_eq!(resp.status_code, 202);
        assert_eq!(
            resp.body_json().unwrap(),
            json!({
                "message": "AI request queued for processing",
                "request_id": "ai_20240501_123045",
            })
        );

        let sent = fx.messaging.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].destination, "queue:///ventaro-ai/sqs/ai-processing-queue");
        let body: Value = serde_json::from_str(&sent[0].body).unwrap();
        assert_eq!(body["type"], "ai_processing");
        assert_eq!(body["model_type"], "gpt-4");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["prompt"], "hi");
        assert_eq!(body["request_id"], "ai_20240501_123045");
        assert_eq!(fx.metric_names(), vec!["AIRequestsQueued"]);
    }

    #[tokio::test]
    async fn explicit_null_options_are_forwarded() {
        let (resp, fx) = run(json!({ "prompt": "hi", "model_type": null, "max_tokens": 10 })).await;
        assert_eq!(resp.status_code, 202);
        let body: Value = serde_json::from_str(&fx.messaging.sent()[0].body).unwrap();
        assert!(body["model_type"].is_null());
        assert_eq!(body["max_tokens"], 10);
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_before_any_sink() {
        for payload in [json!({}), json!({ "prompt": "" }), json!({ "prompt": null })] {
            let (resp, fx) = run(payload).await;
            assert_eq!(resp.status_code, 400);
            assert_eq!(resp.body_json().unwrap(), json!({ "error": "Prompt is required" }));
            assert_eq!(fx.sink_calls(), 0);
        }
    }

    #[tokio::test]
    async fn send_failure_is_reported() {
        let fx = make_fixture();
        fx.messaging.set_failing(true);
        let handler = AiHandler::new(fx.outbound.clone());
        let err = handler
            .handle(&make_call(handler_names::AI, HttpMethod::Post, json!({ "prompt": "hi" })))
            .await
            .unwrap_err();
        let resp = err.into_envelope(handler.fault_message());
        assert_eq!(resp.status_code, 500);
        assert_eq!(resp.body_json().unwrap(), json!({ "error": "Failed to queue AI request" }));
        assert!(fx.metric_names().is_empty());
    }

    #[tokio::test]
    async fn non_object_payload_is_a_fault() {
        let (resp, _fx) = run(json!([1, 2, 3])).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(resp.body_json().unwrap(), json!({ "error": "AI processing error" }));
    }

    async fn run_against(fx: &crate::service::domain::test_support::Fixture) -> ResponseEnvelope {
        AiHandler::new(fx.outbound.clone())
            .handle(&make_call(handler_names::AI, HttpMethod::Post, json!({ "prompt": "hi" })))
            .await
            .unwrap_or_else(|err| err.into_envelope("AI processing error"))
    }

    #[tokio::test]
    async fn failed_send_is_a_server_error() {
        let fx = make_fixture();
        fx.messaging.set_failing(true);
        let resp = run_against(&fx).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(resp.body_json().unwrap(), json!({ "error": "Failed to queue AI request" }));
        assert_eq!(fx.messaging.count(), 1);
        assert!(fx.metric_names().is_empty());
    }

    #[tokio::test]
    async fn missing_queue_is_a_server_error() {
        let fx = crate::service::domain::test_support::make_fixture_with(
            crate::adapters::StaticParameterStore::new(),
        );
        let resp = run_against(&fx).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(resp.body_json().unwrap(), json!({ "error": "Failed to queue AI request" }));
        assert_eq!(fx.sink_calls(), 0);
    }
}
