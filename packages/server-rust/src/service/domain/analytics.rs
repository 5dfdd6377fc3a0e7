//! Analytics handler: queues a product analytics event.

use async_trait::async_trait;
use serde_json::{json, Value};
use ventaro_core::fields::{optional, required};
use ventaro_core::keys::params;
use ventaro_core::{AnalyticsEventRecord, DomainMessage, ResponseEnvelope};

use super::{parameterized_metric, ApiHandler};
use crate::service::operation::{handler_names, ApiCall, HandlerError};
use crate::service::outbound::Outbound;

pub struct AnalyticsHandler {
    outbound: Outbound,
}

impl AnalyticsHandler {
    #[must_use]
    pub fn new(outbound: Outbound) -> Self {
        Self { outbound }
    }
}

#[async_trait]
impl ApiHandler for AnalyticsHandler {
    fn name(&self) -> &'static str {
        handler_names::ANALYTICS
    }

    fn fault_message(&self) -> &'static str {
        "Analytics processing error"
    }

    async fn handle(&self, call: &ApiCall) -> Result<ResponseEnvelope, HandlerError> {
        let fields = call.fields()?;
        let event_type = required(fields, "event_type")
            .cloned()
            .ok_or(HandlerError::bad_request("event_type is required"))?;

        let record = AnalyticsEventRecord {
            event_type: event_type.clone(),
            user_id: optional(fields, "user_id", Value::Null),
            properties: optional(fields, "properties", json!({})),
            timestamp: self.outbound.clock().now().to_iso(),
        };
        if !self
            .outbound
            .enqueue(params::ANALYTICS_QUEUE, &DomainMessage::AnalyticsEvent(record))
            .await
        {
            return Err(HandlerError::Dependency {
                message: "Failed to record analytics event",
            });
        }

        self.outbound.put_metric("AnalyticsEvents", 1.0).await;
        self.outbound
            .put_metric(&parameterized_metric("AnalyticsEvent", &event_type), 1.0)
            .await;
        Ok(ResponseEnvelope::json(
            200,
            &json!({
                "message": "Analytics event recorded",
                "event_type": event_type,
            }),
        ))
    }
}
