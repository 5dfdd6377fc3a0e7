//! Domain messages handed to the messaging sink.
//!
//! Each message is built by exactly one request handler, serialized once, and
//! dropped after the send. The wire form is a flat JSON object whose `type`
//! field names the variant:
//!
//! ```json
//! {"type": "user_creation", "user_id": "u1", "email": "a@b.c", "timestamp": "..."}
//! ```
//!
//! Payload fields are carried as raw JSON values: the processor forwards what
//! the caller sent without coercing types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::Timestamp;

/// Queued request for the AI worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiProcessingRequest {
    pub model_type: Value,
    pub prompt: Value,
    pub max_tokens: Value,
    pub timestamp: String,
    /// `ai_YYYYMMDD_HHMMSS`. Second resolution, so concurrent requests in the
    /// same second share an id.
    pub request_id: String,
}

impl AiProcessingRequest {
    /// Derives the request id for a request received at `at`.
    #[must_use]
    pub fn request_id_for(at: Timestamp) -> String {
        format!("ai_{}", at.to_compact_seconds())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreationRequest {
    pub user_id: Value,
    pub email: Value,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEventRecord {
    pub event_type: Value,
    /// `null` when the caller did not identify a user.
    pub user_id: Value,
    pub properties: Value,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IotDataRecord {
    pub device_id: Value,
    pub device_type: Value,
    pub sensor_data: Value,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeComputationRequest {
    pub edge_node_id: Value,
    pub computation_type: Value,
    pub payload: Value,
    pub timestamp: String,
}

/// A message destined for one of the processing queues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainMessage {
    AiProcessing(AiProcessingRequest),
    UserCreation(UserCreationRequest),
    AnalyticsEvent(AnalyticsEventRecord),
    IotData(IotDataRecord),
    EdgeComputation(EdgeComputationRequest),
}

impl DomainMessage {
    /// The `type` tag this message serializes with.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AiProcessing(_) => "ai_processing",
            Self::UserCreation(_) => "user_creation",
            Self::AnalyticsEvent(_) => "analytics_event",
            Self::IotData(_) => "iot_data",
            Self::EdgeComputation(_) => "edge_computation",
        }
    }

    /// Serializes the message to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if a payload value cannot be serialized.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_type_tag_and_flat_fields() {
        let msg = DomainMessage::UserCreation(UserCreationRequest {
            user_id: json!("u1"),
            email: json!("u1@example.com"),
            timestamp: "2024-05-01T12:30:45.000000".to_string(),
        });
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "user_creation",
                "user_id": "u1",
                "email": "u1@example.com",
                "timestamp": "2024-05-01T12:30:45.000000",
            })
        );
    }

    #[test]
    fn kind_matches_serialized_tag() {
        let msg = DomainMessage::IotData(IotDataRecord {
            device_id: json!("d1"),
            device_type: json!("unknown"),
            sensor_data: json!({}),
            timestamp: String::new(),
        });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], msg.kind());
    }

    #[test]
    fn analytics_keeps_null_user() {
        let msg = DomainMessage::AnalyticsEvent(AnalyticsEventRecord {
            event_type: json!("click"),
            user_id: Value::Null,
            properties: json!({ "button": "buy" }),
            timestamp: String::new(),
        });
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value["user_id"].is_null());
        assert_eq!(value["type"], "analytics_event");
    }

    #[test]
    fn request_id_is_second_resolution() {
        let at = Timestamp::from_unix_secs(1_714_566_645).unwrap();
        assert_eq!(AiProcessingRequest::request_id_for(at), "ai_20240501_123045");
    }
}
