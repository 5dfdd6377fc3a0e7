//! HTTP front for the request router: a real HTTP request under `/api/` is
//! translated into the inbound request shape, handed to the processor, and
//! the envelope is translated back.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};
use ventaro_core::{HttpMethod, InboundRequest, InvocationOutput};

use super::AppState;

pub async fn api_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: Bytes,
) -> Response {
    let query = match query {
        Ok(Query(params)) => Some(params),
        Err(rejection) => {
            warn!(error = %rejection, "ignoring undecodable query string");
            None
        }
    };
    let request = inbound_request(&method, &uri, &headers, query, &body);

    let payload = match serde_json::to_value(&request) {
        Ok(payload) => payload,
        Err(err) => {
            error!(error = %err, "failed to encode inbound request");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    into_http_response(state.processor.handle(payload).await)
}

fn inbound_request(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    query: Option<HashMap<String, String>>,
    body: &[u8],
) -> InboundRequest {
    let mut request = InboundRequest::new(HttpMethod::from(method.as_str()), uri.path());
    request.headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    request.query_string_parameters = query.filter(|q| !q.is_empty());
    if !body.is_empty() {
        request.body = Some(String::from_utf8_lossy(body).into_owned());
    }
    request
}

/// Status and body come from the output; envelope headers are copied,
/// skipping any that are not valid HTTP.
fn into_http_response(output: InvocationOutput) -> Response {
    let status =
        StatusCode::from_u16(output.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::new();
    if let InvocationOutput::Api(envelope) = &output {
        for (name, value) in &envelope.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                headers.insert(name, value);
            }
        }
    }

    (status, headers, output.body().to_string()).into_response()
}
