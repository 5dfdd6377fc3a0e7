//! Liveness endpoint handler.

use axum::http::StatusCode;

/// Liveness probe -- always returns 200 OK.
///
/// Only checks whether the process is running and responsive. Processor
/// health is served by `/api/health`.
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}
