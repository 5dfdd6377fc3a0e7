//! Outbound calls to the configuration provider and the three sinks.
//!
//! Every call here is best-effort: failures are logged with context and
//! reported as `None`/`false`, never retried and never propagated.

use std::sync::Arc;

use tracing::{error, info};
use ventaro_core::keys::DEFAULT_NOTIFICATION_SUBJECT;
use ventaro_core::{
    ClockSource, ConfigProvider, Dimension, DomainMessage, Fields, MessageAttributes,
    MessagingSink, MetricDatum, MetricUnit, MetricsSink, NotificationSink, SystemClock,
};

use super::config::ProcessorConfig;

/// The external collaborators, injected at startup.
#[derive(Clone)]
pub struct Collaborators {
    pub parameters: Arc<dyn ConfigProvider>,
    pub messaging: Arc<dyn MessagingSink>,
    pub notifications: Arc<dyn NotificationSink>,
    pub metrics: Arc<dyn MetricsSink>,
    pub clock: Arc<dyn ClockSource>,
}

impl Collaborators {
    /// Bundles the collaborators with the system clock.
    #[must_use]
    pub fn new(
        parameters: Arc<dyn ConfigProvider>,
        messaging: Arc<dyn MessagingSink>,
        notifications: Arc<dyn NotificationSink>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            parameters,
            messaging,
            notifications,
            metrics,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn ClockSource>) -> Self {
        self.clock = clock;
        self
    }
}

/// Collaborators plus the processor's outbound policies.
#[derive(Clone)]
pub struct Outbound {
    collaborators: Collaborators,
    config: Arc<ProcessorConfig>,
}

impl Outbound {
    #[must_use]
    pub fn new(collaborators: Collaborators, config: Arc<ProcessorConfig>) -> Self {
        Self {
            collaborators,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &dyn ClockSource {
        self.collaborators.clock.as_ref()
    }

    /// Resolves a parameter; lookup errors are logged and read as not found.
    pub async fn get_parameter(&self, name: &str, decrypt: bool) -> Option<String> {
        match self.collaborators.parameters.get_parameter(name, decrypt).await {
            Ok(value) => value,
            Err(err) => {
                error!(parameter = name, error = %err, "error retrieving parameter");
                None
            }
        }
    }

    /// Resolves a JSON secret; lookup errors are logged and read as not found.
    pub async fn get_secret(&self, name: &str) -> Option<Fields> {
        match self.collaborators.parameters.get_secret(name).await {
            Ok(value) => value,
            Err(err) => {
                error!(secret = name, error = %err, "error retrieving secret");
                None
            }
        }
    }

    /// Serializes `message` and sends it with `Environment` and `Timestamp`
    /// attributes.
    pub async fn send_to_queue(&self, queue_url: &str, message: &DomainMessage) -> bool {
        let body = match message.to_json() {
            Ok(body) => body,
            Err(err) => {
                error!(kind = message.kind(), error = %err, "error serializing queue message");
                return false;
            }
        };
        let attributes = MessageAttributes::new()
            .with("Environment", self.config.environment.as_str())
            .with("Timestamp", self.clock().now().to_iso());

        match self
            .collaborators
            .messaging
            .send(queue_url, &body, &attributes)
            .await
        {
            Ok(()) => {
                info!(kind = message.kind(), "message sent to queue");
                true
            }
            Err(err) => {
                error!(kind = message.kind(), queue = queue_url, error = %err, "error sending message to queue");
                false
            }
        }
    }

    /// Resolves the queue behind parameter `key` and sends `message` to it.
    ///
    /// Returns `false` when the parameter is missing or empty, or the send
    /// fails.
    pub async fn enqueue(&self, key: &str, message: &DomainMessage) -> bool {
        match self.get_parameter(key, false).await {
            Some(queue_url) if !queue_url.is_empty() => self.send_to_queue(&queue_url, message).await,
            _ => false,
        }
    }

    /// Publishes a notification. `subject` defaults to the generic subject.
    pub async fn send_notification(&self, topic: &str, message: &str, subject: Option<&str>) -> bool {
        let subject = subject.unwrap_or(DEFAULT_NOTIFICATION_SUBJECT);
        match self
            .collaborators
            .notifications
            .publish(topic, message, subject)
            .await
        {
            Ok(()) => {
                info!(subject, "notification sent");
                true
            }
            Err(err) => {
                error!(subject, topic, error = %err, "error sending notification");
                false
            }
        }
    }

    /// Resolves the topic behind parameter `key` and publishes to it. A
    /// missing topic skips the publish.
    pub async fn notify(&self, key: &str, message: &str, subject: &str) -> bool {
        match self.get_parameter(key, false).await {
            Some(topic) if !topic.is_empty() => {
                self.send_notification(&topic, message, Some(subject)).await
            }
            _ => false,
        }
    }

    /// Records a count metric in the configured namespace, tagged with the
    /// environment.
    pub async fn put_metric(&self, name: &str, value: f64) -> bool {
        self.put_metric_with_unit(name, value, MetricUnit::Count).await
    }

    pub async fn put_metric_with_unit(&self, name: &str, value: f64, unit: MetricUnit) -> bool {
        let datum = MetricDatum {
            name: name.to_string(),
            value,
            unit,
            namespace: self.config.metrics_namespace.clone(),
            dimensions: vec![Dimension::new("Environment", self.config.environment.as_str())],
            timestamp: self.clock().now(),
        };
        match self.collaborators.metrics.record(&datum).await {
            Ok(()) => {
                info!(metric = name, "metric recorded");
                true
            }
            Err(err) => {
                error!(metric = name, error = %err, "error sending metric");
                false
            }
        }
    }
}
