//! Raw invocation endpoint: the request body is the payload as the function
//! runtime would deliver it, and the response body is the processor's
//! result verbatim.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::AppState;

pub async fn invoke_handler(State(state): State<AppState>, Json(payload): Json<Value>) -> Json<Value> {
    Json(state.processor.handle_json(payload).await)
}
