//! Invocation and handler-call types, plus the error types of each layer.

use serde_json::Value;
use ventaro_core::{
    Fields, HttpMethod, InboundEvent, InboundRequest, ResponseEnvelope, Timestamp,
};

/// Request handler names, used for span fields and route registration.
pub mod handler_names {
    pub const HEALTH: &str = "health";
    pub const AI: &str = "ai";
    pub const USER: &str = "user";
    pub const ANALYTICS: &str = "analytics";
    pub const IOT: &str = "iot";
    pub const EDGE: &str = "edge";
}

/// Context created once per invocation by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationContext {
    /// Process-unique, monotonically increasing id for log correlation.
    pub call_id: u64,
    pub received_at: Timestamp,
}

/// A classified inbound payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Request {
        ctx: InvocationContext,
        request: InboundRequest,
    },
    Event {
        ctx: InvocationContext,
        event: InboundEvent,
    },
}

impl Invocation {
    #[must_use]
    pub fn ctx(&self) -> &InvocationContext {
        match self {
            Self::Request { ctx, .. } | Self::Event { ctx, .. } => ctx,
        }
    }
}

/// Context carried with a single request-handler call.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub call_id: u64,
    pub handler: &'static str,
    pub received_at: Timestamp,
    /// 0 means no deadline.
    pub timeout_ms: u64,
}

/// Input of a request handler: the method and the decoded body.
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub ctx: CallContext,
    pub method: HttpMethod,
    /// Decoded body; `{}` when absent or undecodable.
    pub payload: Value,
}

impl ApiCall {
    #[must_use]
    pub fn ctx(&self) -> &CallContext {
        &self.ctx
    }

    /// Returns the payload as a field map.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::PayloadNotObject`] when the body decoded to a
    /// JSON value other than an object.
    pub fn fields(&self) -> Result<&Fields, HandlerError> {
        self.payload.as_object().ok_or(HandlerError::PayloadNotObject)
    }
}

/// Failures inside a handler, converted to a response at the handler boundary.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Caller error (missing field, unsupported method). Not a failure.
    #[error("rejected with {status}: {message}")]
    Rejected { status: u16, message: &'static str },
    /// A destination could not be resolved or a send failed.
    #[error("dependency failure: {message}")]
    Dependency { message: &'static str },
    #[error("payload is not a JSON object")]
    PayloadNotObject,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HandlerError {
    #[must_use]
    pub fn bad_request(message: &'static str) -> Self {
        Self::Rejected {
            status: 400,
            message,
        }
    }

    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::Rejected {
            status: 405,
            message: "Method not allowed",
        }
    }

    /// Converts into the response envelope. Unexpected faults use the
    /// handler's generic `fault_message` so the underlying error never leaks.
    #[must_use]
    pub fn into_envelope(self, fault_message: &str) -> ResponseEnvelope {
        match self {
            Self::Rejected { status, message } => ResponseEnvelope::error(status, message),
            Self::Dependency { message } => ResponseEnvelope::error(500, message),
            Self::PayloadNotObject | Self::Internal(_) => ResponseEnvelope::error(500, fault_message),
        }
    }
}

/// Errors surfacing from a handler service to the router boundary.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("handler timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Errors from classifying a raw payload.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("payload is neither an API request nor an event")]
    UnknownPayload,
    #[error("malformed API request: {0}")]
    MalformedRequest(#[source] serde_json::Error),
    #[error("malformed event: {0}")]
    MalformedEvent(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn call(payload: Value) -> ApiCall {
        ApiCall {
            ctx: CallContext {
                call_id: 1,
                handler: handler_names::AI,
                received_at: Timestamp::now(),
                timeout_ms: 0,
            },
            method: HttpMethod::Post,
            payload,
        }
    }

    #[test]
    fn fields_require_object_payload() {
        assert!(call(json!({ "a": 1 })).fields().is_ok());
        assert!(matches!(
            call(json!([1, 2])).fields(),
            Err(HandlerError::PayloadNotObject)
        ));
    }

    #[test]
    fn rejected_keeps_status_and_message() {
        let env = HandlerError::bad_request("Prompt is required").into_envelope("AI processing error");
        assert_eq!(env.status_code, 400);
        assert_eq!(env.body_json().unwrap(), json!({ "error": "Prompt is required" }));

        let env = HandlerError::method_not_allowed().into_envelope("User processing error");
        assert_eq!(env.status_code, 405);
    }

    #[test]
    fn faults_never_leak_details() {
        let err = HandlerError::Internal(anyhow::anyhow!("connection reset by peer"));
        let env = err.into_envelope("IoT processing error");
        assert_eq!(env.status_code, 500);
        assert_eq!(env.body_json().unwrap(), json!({ "error": "IoT processing error" }));
    }

    #[test]
    fn dependency_failures_use_their_own_message() {
        let err = HandlerError::Dependency {
            message: "Failed to queue AI request",
        };
        let env = err.into_envelope("AI processing error");
        assert_eq!(env.status_code, 500);
        assert_eq!(
            env.body_json().unwrap(),
            json!({ "error": "Failed to queue AI request" })
        );
    }
}
