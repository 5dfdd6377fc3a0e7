//! Payload classification: converts a raw JSON payload into a typed
//! `Invocation`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use ventaro_core::{ClockSource, InboundEvent, InboundRequest};

use super::operation::{ClassifyError, Invocation, InvocationContext};

/// Field whose presence marks an API request.
const REQUEST_MARKER: &str = "httpMethod";
/// Field whose presence marks an event-bus event.
const EVENT_MARKER: &str = "source";

// ---------------------------------------------------------------------------
// InvocationService
// ---------------------------------------------------------------------------

/// Classifies raw payloads by field presence.
///
/// Each call stamps a fresh receive time and a unique call ID.
pub struct InvocationService {
    clock: Arc<dyn ClockSource>,
    call_id_counter: AtomicU64,
}

impl InvocationService {
    #[must_use]
    pub fn new(clock: Arc<dyn ClockSource>) -> Self {
        Self {
            clock,
            call_id_counter: AtomicU64::new(1),
        }
    }

    fn next_call_id(&self) -> u64 {
        self.call_id_counter.fetch_add(1, Ordering::Relaxed)
    }

    fn make_ctx(&self) -> InvocationContext {
        InvocationContext {
            call_id: self.next_call_id(),
            received_at: self.clock.now(),
        }
    }

    /// Classify a payload into an `Invocation`.
    ///
    /// A `httpMethod` key wins over a `source` key when both are present.
    ///
    /// # Errors
    ///
    /// - `ClassifyError::UnknownPayload` for non-objects and objects carrying
    ///   neither marker
    /// - `ClassifyError::MalformedRequest` when a request's `path` or `body`
    ///   has the wrong JSON type
    /// - `ClassifyError::MalformedEvent` when an event cannot be decoded
    pub fn classify(&self, payload: Value) -> Result<Invocation, ClassifyError> {
        let Some(fields) = payload.as_object() else {
            return Err(ClassifyError::UnknownPayload);
        };

        if fields.contains_key(REQUEST_MARKER) {
            let request: InboundRequest =
                serde_json::from_value(payload).map_err(ClassifyError::MalformedRequest)?;
            return Ok(Invocation::Request {
                ctx: self.make_ctx(),
                request,
            });
        }

        if fields.contains_key(EVENT_MARKER) {
            let event: InboundEvent =
                serde_json::from_value(payload).map_err(ClassifyError::MalformedEvent)?;
            return Ok(Invocation::Event {
                ctx: self.make_ctx(),
                event,
            });
        }

        Err(ClassifyError::UnknownPayload)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
