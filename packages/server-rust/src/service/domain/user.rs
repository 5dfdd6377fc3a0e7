//! User handler: POST queues a user creation, GET returns a static status.

use async_trait::async_trait;
use serde_json::json;
use ventaro_core::fields::required;
use ventaro_core::keys::params;
use ventaro_core::{DomainMessage, HttpMethod, ResponseEnvelope, UserCreationRequest};

use super::ApiHandler;
use crate::service::operation::{handler_names, ApiCall, HandlerError};
use crate::service::outbound::Outbound;

pub struct UserHandler {
    outbound: Outbound,
}

impl UserHandler {
    #[must_use]
    pub fn new(outbound: Outbound) -> Self {
        Self { outbound }
    }

    async fn create(&self, call: &ApiCall) -> Result<ResponseEnvelope, HandlerError> {
        let fields = call.fields()?;
        let (Some(user_id), Some(email)) = (required(fields, "user_id"), required(fields, "email"))
        else {
            return Err(HandlerError::bad_request("user_id and email are required"));
        };

        let request = UserCreationRequest {
            user_id: user_id.clone(),
            email: email.clone(),
            timestamp: self.outbound.clock().now().to_iso(),
        };
        if !self
            .outbound
            .enqueue(params::USER_PROCESSING_QUEUE, &DomainMessage::UserCreation(request))
            .await
        {
            return Err(HandlerError::Dependency {
                message: "Failed to process user request",
            });
        }

        self.outbound.put_metric("UserCreationRequests", 1.0).await;
        Ok(ResponseEnvelope::json(
            201,
            &json!({
                "message": "User creation request processed",
                "user_id": user_id,
            }),
        ))
    }
}

#[async_trait]
impl ApiHandler for UserHandler {
    fn name(&self) -> &'static str {
        handler_names::USER
    }

    fn fault_message(&self) -> &'static str {
        "User processing error"
    }

    async fn handle(&self, call: &ApiCall) -> Result<ResponseEnvelope, HandlerError> {
        match call.method {
            HttpMethod::Post => self.create(call).await,
            HttpMethod::Get => Ok(ResponseEnvelope::json(
                200,
                &json!({
                    "message": "User data retrieval endpoint",
                    "status": "active",
                }),
            )),
            _ => Err(HandlerError::method_not_allowed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::service::domain::test_support::{make_call, make_fixture, Fixture};

    async fn run(method: HttpMethod, payload: Value) -> (ResponseEnvelope, Fixture) {
        let fx = make_fixture();
        let handler = UserHandler::new(fx.outbound.clone());
        let resp = match handler.handle(&make_call(handler_names::USER, method, payload)).await {
            Ok(resp) => resp,
            Err(err) => err.into_envelope(handler.fault_message()),
        };
        (resp, fx)
    }

    #[tokio::test]
    async fn post_queues_user_creation() {
        let (resp, fx) = run(HttpMethod::Post, json!({ "user_id": "u1", "email": "u1@x.io" })).await;
        assert_eq!(resp.status_code, 201);
        assert_eq!(
            resp.body_json().unwrap(),
            json!({ "message": "User creation request processed", "user_id": "u1" })
        );
        let body: Value = serde_json::from_str(&fx.messaging.sent()[0].body).unwrap();
        assert_eq!(body["type"], "user_creation");
        assert_eq!(body["email"], "u1@x.io");
        assert_eq!(fx.metric_names(), vec!["UserCreationRequests"]);
    }

    #[tokio::test]
    async fn post_requires_both_fields() {
        let (resp, fx) = run(HttpMethod::Post, json!({ "user_id": "u1" })).await;
        assert_eq!(resp.status_code, 400);
        assert_eq!(
            resp.body_json().unwrap(),
            json!({ "error": "user_id and email are required" })
        );
        assert_eq!(fx.sink_calls(), 0);
    }

    #[tokio::test]
    async fn get_is_static() {
        let (resp, fx) = run(HttpMethod::Get, json!("not an object")).await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(
            resp.body_json().unwrap(),
            json!({ "message": "User data retrieval endpoint", "status": "active" })
        );
        assert_eq!(fx.sink_calls(), 0);
    }

    #[tokio::test]
    async fn other_methods_are_not_allowed() {
        for method in [HttpMethod::Delete, HttpMethod::Put, HttpMethod::Other(String::new())] {
            let (resp, _fx) = run(method, json!({})).await;
            assert_eq!(resp.status_code, 405);
            assert_eq!(resp.body_json().unwrap(), json!({ "error": "Method not allowed" }));
        }
    }

    #[tokio::test]
    async fn missing_queue_fails_the_request() {
        let fx = crate::service::domain::test_support::make_fixture_with(
            crate::adapters::StaticParameterStore::new(),
        );
        let handler = UserHandler::new(fx.outbound.clone());
        let err = handler
            .handle(&make_call(
                handler_names::USER,
                HttpMethod::Post,
                json!({ "user_id": "u1", "email": "e" }),
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Dependency { message: "Failed to process user request" }
        ));
        assert_eq!(fx.messaging.count(), 0);
    }
}
