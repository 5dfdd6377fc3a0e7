//! Health handler: static status report plus a `HealthCheck` metric.

use async_trait::async_trait;
use serde_json::json;
use ventaro_core::ResponseEnvelope;

use super::ApiHandler;
use crate::service::operation::{handler_names, ApiCall, HandlerError};
use crate::service::outbound::Outbound;

pub struct HealthHandler {
    outbound: Outbound,
}

impl HealthHandler {
    #[must_use]
    pub fn new(outbound: Outbound) -> Self {
        Self { outbound }
    }
}

#[async_trait]
impl ApiHandler for HealthHandler {
    fn name(&self) -> &'static str {
        handler_names::HEALTH
    }

    fn fault_message(&self) -> &'static str {
        "Internal server error"
    }

    async fn handle(&self, _call: &ApiCall) -> Result<ResponseEnvelope, HandlerError> {
        let config = self.outbound.config();
        let body = json!({
            "status": "healthy",
            "timestamp": self.outbound.clock().now().to_iso(),
            "environment": config.environment,
            "region": config.region,
            "version": config.service_version,
        });
        self.outbound.put_metric("HealthCheck", 1.0).await;
        Ok(ResponseEnvelope::json(200, &body))
    }
}
