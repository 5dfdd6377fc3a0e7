use serde_json::{json, Value};
use tracing::{info, warn};
use ventaro_core::fields::{display_value, optional, Fields};
use ventaro_core::keys::{events, params};
use ventaro_core::EventOutcome;

use super::EventError;
use crate::service::outbound::Outbound;

fn detail_fields(detail: &Value) -> Result<&Fields, EventError> {
    detail.as_object().ok_or(EventError::DetailNotObject)
}

/// Notifies the notifications topic for deployment, error and security events.
pub(super) async fn application_event(
    outbound: &Outbound,
    detail: &Value,
) -> Result<EventOutcome, EventError> {
    let fields = detail_fields(detail)?;
    let event_name = optional(fields, "event_name", json!(""));
    let name = display_value(&event_name);
    info!(event_name = %name, "handling application event");

    let is_critical = event_name
        .as_str()
        .is_some_and(|n| events::CRITICAL_EVENT_NAMES.contains(&n));
    if is_critical {
        let message = format!(
            "Application Event: {name}\nDetails: {}",
            serde_json::to_string_pretty(detail)?
        );
        outbound
            .notify(params::NOTIFICATIONS_TOPIC, &message, &format!("Ventaro AI: {name}"))
            .await;
    }

    Ok(EventOutcome::ok("Application event handled"))
}

pub(super) async fn user_action(outbound: &Outbound, detail: &Value) -> Result<EventOutcome, EventError> {
    let fields = detail_fields(detail)?;
    let action = display_value(&optional(fields, "action", json!("")));
    let user_id = display_value(&optional(fields, "user_id", json!("")));
    info!(action = %action, user_id = %user_id, "handling user action");

    outbound.put_metric(&format!("UserAction_{action}"), 1.0).await;

    Ok(EventOutcome::ok("User action event handled"))
}

/// Publishes critical and high alerts, and counts every alert by type and
/// severity.
pub(super) async fn system_alert(outbound: &Outbound, detail: &Value) -> Result<EventOutcome, EventError> {
    let fields = detail_fields(detail)?;
    let alert_type = display_value(&optional(fields, "alert_type", json!("")));
    let severity_value = optional(fields, "severity", json!("info"));
    let severity = display_value(&severity_value);
    warn!(alert_type = %alert_type, severity = %severity, "system alert");

    let should_notify = severity_value
        .as_str()
        .is_some_and(|s| events::NOTIFY_SEVERITIES.contains(&s));
    if should_notify {
        let message = format!(
            "System Alert: {alert_type}\nSeverity: {severity}\nDetails: {}",
            serde_json::to_string_pretty(detail)?
        );
        outbound
            .notify(params::ALERTS_TOPIC, &message, &format!("Ventaro AI Alert: {alert_type}"))
            .await;
    }

    outbound.put_metric(&format!("SystemAlert_{alert_type}"), 1.0).await;
    outbound.put_metric(&format!("AlertSeverity_{severity}"), 1.0).await;

    Ok(EventOutcome::ok("System alert handled"))
}
