//! Request routing: dispatches an `InboundRequest` to the first handler whose
//! path prefix matches.

use parking_lot::Mutex;
use serde_json::Value;
use tower::ServiceExt;
use tracing::{error, info, warn};
use ventaro_core::{InboundRequest, ResponseEnvelope};

use super::middleware::pipeline::HandlerPipeline;
use super::operation::{ApiCall, CallContext, InvocationContext};

/// Route prefixes in match priority order.
pub const ROUTE_PREFIXES: [&str; 6] = [
    "/api/health",
    "/api/ai",
    "/api/user",
    "/api/analytics",
    "/api/iot",
    "/api/edge",
];

// ---------------------------------------------------------------------------
// RequestRouter
// ---------------------------------------------------------------------------

struct Route {
    prefix: &'static str,
    name: &'static str,
    // BoxCloneService is Send but not Sync; each call clones it under the lock.
    service: Mutex<HandlerPipeline>,
}

/// Ordered prefix table of handler pipelines.
///
/// Matching is plain `starts_with` in registration order, so `/api/aiX`
/// routes to the `/api/ai` handler and `/api/users` to `/api/user`. Paths
/// matching no prefix get 404 `Endpoint not found`.
pub struct RequestRouter {
    routes: Vec<Route>,
    timeout_ms: u64,
}

impl RequestRouter {
    /// Create an empty router whose calls carry the given deadline.
    #[must_use]
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            routes: Vec::new(),
            timeout_ms,
        }
    }

    /// Append a route. Earlier routes win.
    pub fn register(&mut self, prefix: &'static str, name: &'static str, service: HandlerPipeline) {
        self.routes.push(Route {
            prefix,
            name,
            service: Mutex::new(service),
        });
    }

    /// First route whose prefix starts `path`.
    fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| path.starts_with(route.prefix))
    }

    /// Dispatch a request to its handler and return the envelope.
    ///
    /// This is the router fault boundary: any `OperationError` from the
    /// handler pipeline becomes 500 `Internal server error`.
    pub async fn dispatch(&self, ctx: InvocationContext, request: InboundRequest) -> ResponseEnvelope {
        info!(call_id = ctx.call_id, method = %request.method, path = %request.path, "processing request");

        let Some(route) = self.find(&request.path) else {
            return ResponseEnvelope::error(404, "Endpoint not found");
        };

        let call = ApiCall {
            ctx: CallContext {
                call_id: ctx.call_id,
                handler: route.name,
                received_at: ctx.received_at,
                timeout_ms: self.timeout_ms,
            },
            payload: decode_body(ctx.call_id, &request),
            method: request.method,
        };

        let service = route.service.lock().clone();
        match service.oneshot(call).await {
            Ok(envelope) => envelope,
            Err(err) => {
                error!(call_id = ctx.call_id, handler = route.name, error = %err, "error processing API request");
                ResponseEnvelope::error(500, "Internal server error")
            }
        }
    }
}

/// Decodes a present, non-empty body. Undecodable bodies read as `{}`.
fn decode_body(call_id: u64, request: &InboundRequest) -> Value {
    let Some(body) = request.non_empty_body() else {
        return Value::Object(serde_json::Map::new());
    };
    serde_json::from_str(body).unwrap_or_else(|err| {
        warn!(call_id, error = %err, "invalid JSON in request body");
        Value::Object(serde_json::Map::new())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
