//! Response shapes returned to the invoking runtime.
//!
//! Three shapes exist, all with a camel-cased `statusCode`:
//!
//! - [`ResponseEnvelope`] for API requests: fixed CORS headers and a JSON body.
//! - [`EventOutcome`] for event-bus messages: plain-text body, no headers.
//! - [`FaultResponse`] for payloads that never reached a router: JSON body,
//!   no headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Headers attached to every API response.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
    ),
    ("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS"),
];

/// Normalized API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-serialized object.
    pub body: String,
}

impl ResponseEnvelope {
    /// Builds an envelope around a JSON body.
    #[must_use]
    pub fn json(status_code: u16, body: &Value) -> Self {
        Self {
            status_code,
            headers: CORS_HEADERS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            body: body.to_string(),
        }
    }

    /// Builds an `{"error": message}` envelope.
    #[must_use]
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, &json!({ "error": message }))
    }

    /// Parses the body back into JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON (never the case for
    /// envelopes built through [`ResponseEnvelope::json`]).
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Result of handling an event-bus message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOutcome {
    pub status_code: u16,
    pub body: String,
}

impl EventOutcome {
    #[must_use]
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// A 200 outcome.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// Response for payloads rejected or failed before any router produced one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultResponse {
    pub status_code: u16,
    /// JSON-serialized `{"error": ...}` object.
    pub body: String,
}

impl FaultResponse {
    #[must_use]
    pub fn new(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: json!({ "error": message }).to_string(),
        }
    }

    /// 400 for a payload that is neither a request nor an event.
    #[must_use]
    pub fn unknown_payload() -> Self {
        Self::new(400, "Unknown event type")
    }

    /// 500 for a fault that escaped both routers.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(500, "Internal server error")
    }
}

/// Any of the three response shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InvocationOutput {
    Api(ResponseEnvelope),
    Event(EventOutcome),
    Fault(FaultResponse),
}

impl InvocationOutput {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Api(env) => env.status_code,
            Self::Event(outcome) => outcome.status_code,
            Self::Fault(fault) => fault.status_code,
        }
    }

    /// Returns the body string regardless of shape.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Api(env) => &env.body,
            Self::Event(outcome) => &outcome.body,
            Self::Fault(fault) => &fault.body,
        }
    }
}

impl From<ResponseEnvelope> for InvocationOutput {
    fn from(env: ResponseEnvelope) -> Self {
        Self::Api(env)
    }
}

impl From<EventOutcome> for InvocationOutput {
    fn from(outcome: EventOutcome) -> Self {
        Self::Event(outcome)
    }
}

impl From<FaultResponse> for InvocationOutput {
    fn from(fault: FaultResponse) -> Self {
        Self::Fault(fault)
    }
}
