//! Event routing: dispatches event-bus events from the `ventaro.ai` source
//! to one of three handlers and counts everything else.

mod handlers;

use tracing::{error, info};
use ventaro_core::keys::events;
use ventaro_core::{EventOutcome, InboundEvent};

use super::operation::InvocationContext;
use super::outbound::Outbound;

/// The event types handled by name. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Application,
    UserAction,
    SystemAlert,
    Other,
}

impl EventKind {
    /// Classify on exact `source` and `detail-type` match.
    #[must_use]
    pub fn of(event: &InboundEvent) -> Self {
        if event.source != events::SOURCE {
            return Self::Other;
        }
        match event.detail_type.as_str() {
            events::APPLICATION_EVENT => Self::Application,
            events::USER_ACTION => Self::UserAction,
            events::SYSTEM_ALERT => Self::SystemAlert,
            _ => Self::Other,
        }
    }
}

/// Failures inside an event handler.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event detail is not a JSON object")]
    DetailNotObject,
    #[error("failed to render event detail: {0}")]
    Render(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// EventRouter
// ---------------------------------------------------------------------------

pub struct EventRouter {
    outbound: Outbound,
}

impl EventRouter {
    #[must_use]
    pub fn new(outbound: Outbound) -> Self {
        Self { outbound }
    }

    /// Dispatch an event and return its outcome.
    ///
    /// This is the event router fault boundary: any handler error becomes
    /// `{500, "Event processing error"}`.
    pub async fn dispatch(&self, ctx: InvocationContext, event: &InboundEvent) -> EventOutcome {
        info!(
            call_id = ctx.call_id,
            source = %event.source,
            detail_type = %event.detail_type,
            "processing event"
        );

        let result = match EventKind::of(event) {
            EventKind::Application => handlers::application_event(&self.outbound, &event.detail).await,
            EventKind::UserAction => handlers::user_action(&self.outbound, &event.detail).await,
            EventKind::SystemAlert => handlers::system_alert(&self.outbound, &event.detail).await,
            EventKind::Other => {
                self.outbound.put_metric("EventsProcessed", 1.0).await;
                Ok(EventOutcome::ok("Event processed successfully"))
            }
        };

        result.unwrap_or_else(|err| {
            error!(call_id = ctx.call_id, error = %err, "error processing event");
            EventOutcome::new(500, "Event processing error")
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use ventaro_core::keys::params;

    use super::*;
    use crate::service::domain::test_support::{make_fixture, now, Fixture};

    fn ctx() -> InvocationContext {
        InvocationContext {
            call_id: 3,
            received_at: now(),
        }
    }

    async fn dispatch(source: &str, detail_type: &str, detail: Value) -> (EventOutcome, Fixture) {
        let fx = make_fixture();
        let router = EventRouter::new(fx.outbound.clone());
        let outcome = router
            .dispatch(ctx(), &InboundEvent::new(source, detail_type, detail))
            .await;
        (outcome, fx)
    }

    #[test]
    fn kind_requires_exact_source() {
        let ev = InboundEvent::new("ventaro.ai", "System Alert", json!({}));
        assert_eq!(EventKind::of(&ev), EventKind::SystemAlert);
        let ev = InboundEvent::new("Ventaro.AI", "System Alert", json!({}));
        assert_eq!(EventKind::of(&ev), EventKind::Other);
        let ev = InboundEvent::new("ventaro.ai", "system alert", json!({}));
        assert_eq!(EventKind::of(&ev), EventKind::Other);
    }

    #[tokio::test]
    async fn foreign_source_falls_through() {
        let (outcome, fx) = dispatch("aws.ec2", "System Alert", json!("ignored")).await;
        assert_eq!(outcome, EventOutcome::ok("Event processed successfully"));
        assert_eq!(fx.metric_names(), vec!["EventsProcessed"]);
        assert_eq!(fx.notifications.count(), 0);
    }

    #[tokio::test]
    async fn critical_application_event_notifies() {
        let (outcome, fx) = dispatch(
            "ventaro.ai",
            "Application Event",
            json!({ "event_name": "deployment_completed", "version": "2.1" }),
        )
        .await;
        assert_eq!(outcome, EventOutcome::ok("Application event handled"));

        let published = fx.notifications.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].destination, format!("queue://{}", params::NOTIFICATIONS_TOPIC));
        assert_eq!(published[0].subject, "Ventaro AI: deployment_completed");
        assert_eq!(
            published[0].message,
            "Application Event: deployment_completed\nDetails: {\n  \"event_name\": \"deployment_completed\",\n  \"version\": \"2.1\"\n}"
        );
    }

    #[tokio::test]
    async fn routine_application_event_is_silent() {
        let (outcome, fx) =
            dispatch("ventaro.ai", "Application Event", json!({ "event_name": "cache_warmed" })).await;
        assert_eq!(outcome.status_code, 200);
        assert_eq!(fx.sink_calls(), 0);
    }

    #[tokio::test]
    async fn user_action_records_metric() {
        let (outcome, fx) =
            dispatch("ventaro.ai", "User Action", json!({ "action": "login", "user_id": "u1" })).await;
        assert_eq!(outcome, EventOutcome::ok("User action event handled"));
        assert_eq!(fx.metric_names(), vec!["UserAction_login"]);
    }

    #[tokio::test]
    async fn low_severity_alert_records_without_publishing() {
        let (outcome, fx) = dispatch(
            "ventaro.ai",
            "System Alert",
            json!({ "alert_type": "disk", "severity": "low" }),
        )
        .await;
        assert_eq!(outcome, EventOutcome::ok("System alert handled"));
        assert_eq!(fx.notifications.count(), 0);
        assert_eq!(fx.metric_names(), vec!["SystemAlert_disk", "AlertSeverity_low"]);
    }

    #[tokio::test]
    async fn critical_alert_publishes_to_alerts_topic() {
        let (outcome, fx) = dispatch(
            "ventaro.ai",
            "System Alert",
            json!({ "alert_type": "cpu", "severity": "critical" }),
        )
        .await;
        assert_eq!(outcome.status_code, 200);
        let published = fx.notifications.published();
        assert_eq!(published[0].destination, format!("queue://{}", params::ALERTS_TOPIC));
        assert_eq!(published[0].subject, "Ventaro AI Alert: cpu");
        assert!(published[0].message.starts_with("System Alert: cpu\nSeverity: critical\nDetails: {\n  "));
        assert_eq!(fx.metric_names(), vec!["SystemAlert_cpu", "AlertSeverity_critical"]);
    }

    #[tokio::test]
    async fn alert_details_keep_arrival_order() {
        let (_outcome, fx) = dispatch(
            "ventaro.ai",
            "System Alert",
            json!({ "severity": "critical", "zeta": 1, "alpha": 2 }),
        )
        .await;
        assert_eq!(
            fx.notifications.published()[0].message,
            "System Alert: \nSeverity: critical\nDetails: {\n  \"severity\": \"critical\",\n  \"zeta\": 1,\n  \"alpha\": 2\n}"
        );
    }

    #[tokio::test]
    async fn alert_defaults_to_info_severity() {
        let (_outcome, fx) = dispatch("ventaro.ai", "System Alert", json!({})).await;
        assert_eq!(fx.metric_names(), vec!["SystemAlert_", "AlertSeverity_info"]);
    }

    #[tokio::test]
    async fn non_object_detail_is_a_processing_error() {
        for detail in [json!(null), json!("text"), json!([1])] {
            let (outcome, _fx) = dispatch("ventaro.ai", "User Action", detail).await;
            assert_eq!(outcome, EventOutcome::new(500, "Event processing error"));
        }
    }
}
