//! Edge handler: queues a computation for an edge node.

use async_trait::async_trait;
use serde_json::json;
use ventaro_core::fields::{optional, required};
use ventaro_core::keys::params;
use ventaro_core::{DomainMessage, EdgeComputationRequest, ResponseEnvelope};

use super::ApiHandler;
use crate::service::operation::{handler_names, ApiCall, HandlerError};
use crate::service::outbound::Outbound;

pub struct EdgeHandler {
    outbound: Outbound,
}

impl EdgeHandler {
    #[must_use]
    pub fn new(outbound: Outbound) -> Self {
        Self { outbound }
    }
}

#[async_trait]
impl ApiHandler for EdgeHandler {
    fn name(&self) -> &'static str {
        handler_names::EDGE
    }

    fn fault_message(&self) -> &'static str {
        "Edge processing error"
    }

    async fn handle(&self, call: &ApiCall) -> Result<ResponseEnvelope, HandlerError> {
        let fields = call.fields()?;
        let (Some(edge_node_id), Some(computation_type)) = (
            required(fields, "edge_node_id"),
            required(fields, "computation_type"),
        ) else {
            return Err(HandlerError::bad_request(
                "edge_node_id and computation_type are required",
            ));
        };

        let request = EdgeComputationRequest {
            edge_node_id: edge_node_id.clone(),
            computation_type: computation_type.clone(),
            payload: optional(fields, "payload", json!({})),
            timestamp: self.outbound.clock().now().to_iso(),
        };
        if !self
            .outbound
            .enqueue(params::EDGE_QUEUE, &DomainMessage::EdgeComputation(request))
            .await
        {
            return Err(HandlerError::Dependency {
                message: "Failed to process edge request",
            });
        }

        self.outbound.put_metric("EdgeComputationRequests", 1.0).await;
        Ok(ResponseEnvelope::json(
            200,
            &json!({
                "message": "Edge computation request processed",
                "edge_node_id": edge_node_id,
            }),
        ))
    }
}
