//! IoT handler: queues a device reading.

use async_trait::async_trait;
use serde_json::json;
use ventaro_core::fields::{optional, required};
use ventaro_core::keys::params;
use ventaro_core::{DomainMessage, IotDataRecord, ResponseEnvelope};

use super::{parameterized_metric, ApiHandler};
use crate::service::operation::{handler_names, ApiCall, HandlerError};
use crate::service::outbound::Outbound;

pub struct IotHandler {
    outbound: Outbound,
}

impl IotHandler {
    #[must_use]
    pub fn new(outbound: Outbound) -> Self {
        Self { outbound }
    }
}

#[async_trait]
impl ApiHandler for IotHandler {
    fn name(&self) -> &'static str {
        handler_names::IOT
    }

    fn fault_message(&self) -> &'static str {
        "IoT processing error"
    }

    async fn handle(&self, call: &ApiCall) -> Result<ResponseEnvelope, HandlerError> {
        let fields = call.fields()?;
        let device_id = required(fields, "device_id")
            .cloned()
            .ok_or(HandlerError::bad_request("device_id is required"))?;
        let device_type = optional(fields, "device_type", json!("unknown"));

        let record = IotDataRecord {
            device_id: device_id.clone(),
            device_type: device_type.clone(),
            sensor_data: optional(fields, "sensor_data", json!({})),
            timestamp: self.outbound.clock().now().to_iso(),
        };
        if !self
            .outbound
            .enqueue(params::IOT_QUEUE, &DomainMessage::IotData(record))
            .await
        {
            return Err(HandlerError::Dependency {
                message: "Failed to process IoT data",
            });
        }

        self.outbound.put_metric("IoTEvents", 1.0).await;
        self.outbound
            .put_metric(&parameterized_metric("IoTDevice", &device_type), 1.0)
            .await;
        Ok(ResponseEnvelope::json(
            200,
            &json!({
                "message": "IoT data processed",
                "device_id": device_id,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use ventaro_core::HttpMethod;

    use super::*;
    use crate::service::domain::test_support::{make_call, make_fixture};

    #[tokio::test]
    async fn unknown_device_type_by_default() {
        let fx = make_fixture();
        let handler = IotHandler::new(fx.outbound.clone());
        let resp = handler
            .handle(&make_call(
                handler_names::IOT,
                HttpMethod::Post,
                json!({ "device_id": "d1", "sensor_data": { "t": 21.5 } }),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status_code, 200);
        assert_eq!(
            resp.body_json().unwrap(),
            json!({ "message": "IoT data processed", "device_id": "d1" })
        );
        let body: Value = serde_json::from_str(&fx.messaging.sent()[0].body).unwrap();
        assert_eq!(body["device_type"], "unknown");
        assert_eq!(body["sensor_data"], json!({ "t": 21.5 }));
        assert_eq!(fx.metric_names(), vec!["IoTEvents", "IoTDevice_unknown"]);
    }

    #[tokio::test]
    async fn sensor_data_keeps_key_order_on_the_wire() {
        let fx = make_fixture();
        let handler = IotHandler::new(fx.outbound.clone());
        handler
            .handle(&make_call(
                handler_names::IOT,
                HttpMethod::Post,
                json!({ "device_id": "d1", "sensor_data": { "zeta": 1, "alpha": 2 } }),
            ))
            .await
            .unwrap();
        let body = &fx.messaging.sent()[0].body;
        assert!(body.contains(r#""sensor_data":{"zeta":1,"alpha":2}"#), "{body}");
    }

    #[tokio::test]
    async fn numeric_device_type_renders_as_json() {
        let fx = make_fixture();
        let handler = IotHandler::new(fx.outbound.clone());
        handler
            .handle(&make_call(
                handler_names::IOT,
                HttpMethod::Post,
                json!({ "device_id": 9, "device_type": 4 }),
            ))
            .await
            .unwrap();
        assert_eq!(fx.metric_names(), vec!["IoTEvents", "IoTDevice_4"]);
    }

    #[tokio::test]
    async fn missing_device_id_is_rejected() {
        let fx = make_fixture();
        let handler = IotHandler::new(fx.outbound.clone());
        let err = handler
            .handle(&make_call(handler_names::IOT, HttpMethod::Post, json!({ "device_id": 0 })))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Rejected { status: 400, message: "device_id is required" }));
        assert_eq!(fx.sink_calls(), 0);
    }

    async fn run_against(fx: &crate::service::domain::test_support::Fixture) -> ResponseEnvelope {
        IotHandler::new(fx.outbound.clone())
            .handle(&make_call(handler_names::IOT, HttpMethod::Post, json!({ "device_id": "d1", "device_type": "thermo" })))
            .await
            .unwrap_or_else(|err| err.into_envelope("IoT processing error"))
    }

    #[tokio::test]
    async fn failed_send_is_a_server_error() {
        let fx = make_fixture();
        fx.messaging.set_failing(true);
        let resp = run_against(&fx).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(resp.body_json().unwrap(), json!({ "error": "Failed to process IoT data" }));
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
        assert_eq!(resp.body_json().unwrap(), json!({ "error": "Failed to process IoT data" }));
        assert_eq!(fx.sink_calls(), 0);
    }
}
