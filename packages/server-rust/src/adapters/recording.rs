//! In-memory sinks that capture every call, for tests and local runs.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use ventaro_core::{
    MessageAttributes, MessagingSink, MetricDatum, MetricsSink, NotificationSink,
};

/// Shared failure switch. Failing sinks still count the attempt.
#[derive(Debug, Default)]
struct FailureSwitch(AtomicBool);

impl FailureSwitch {
    fn set(&self, failing: bool) {
        self.0.store(failing, Ordering::SeqCst);
    }

    fn check(&self, sink: &str) -> anyhow::Result<()> {
        if self.0.load(Ordering::SeqCst) {
            anyhow::bail!("{sink} unavailable");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Messaging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub destination: String,
    pub body: String,
    pub attributes: MessageAttributes,
}

#[derive(Debug, Default)]
pub struct RecordingMessagingSink {
    sent: Mutex<Vec<SentMessage>>,
    attempts: Mutex<usize>,
    failing: FailureSwitch,
}

impl RecordingMessagingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Messages accepted so far.
    #[must_use]
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Send attempts, including failed ones.
    #[must_use]
    pub fn count(&self) -> usize {
        *self.attempts.lock()
    }
}

#[async_trait]
impl MessagingSink for RecordingMessagingSink {
    async fn send(
        &self,
        destination: &str,
        body: &str,
        attributes: &MessageAttributes,
    ) -> anyhow::Result<()> {
        *self.attempts.lock() += 1;
        self.failing.check("messaging")?;
        self.sent.lock().push(SentMessage {
            destination: destination.to_string(),
            body: body.to_string(),
            attributes: attributes.clone(),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedNotification {
    pub destination: String,
    pub message: String,
    pub subject: String,
}

#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    published: Mutex<Vec<PublishedNotification>>,
    attempts: Mutex<usize>,
    failing: FailureSwitch,
}

impl RecordingNotificationSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    #[must_use]
    pub fn published(&self) -> Vec<PublishedNotification> {
        self.published.lock().clone()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        *self.attempts.lock()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn publish(&self, destination: &str, message: &str, subject: &str) -> anyhow::Result<()> {
        *self.attempts.lock() += 1;
        self.failing.check("notifications")?;
        self.published.lock().push(PublishedNotification {
            destination: destination.to_string(),
            message: message.to_string(),
            subject: subject.to_string(),
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingMetricsSink {
    recorded: Mutex<Vec<MetricDatum>>,
    attempts: Mutex<usize>,
    failing: FailureSwitch,
}

impl RecordingMetricsSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    #[must_use]
    pub fn recorded(&self) -> Vec<MetricDatum> {
        self.recorded.lock().clone()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        *self.attempts.lock()
    }
}

#[async_trait]
impl MetricsSink for RecordingMetricsSink {
    async fn record(&self, datum: &MetricDatum) -> anyhow::Result<()> {
        *self.attempts.lock() += 1;
        self.failing.check("metrics")?;
        self.recorded.lock().push(datum.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ventaro_core::{MetricUnit, Timestamp};

    use super::*;

    #[tokio::test]
    async fn failed_attempts_are_counted_but_not_kept() {
        let sink = RecordingMessagingSink::new();
        sink.send("q", "{}", &MessageAttributes::new()).await.unwrap();
        sink.set_failing(true);
        assert!(sink.send("q", "{}", &MessageAttributes::new()).await.is_err());
        assert_eq!(sink.count(), 2);
        assert_eq!(sink.sent().len(), 1);
    }

    #[tokio::test]
    async fn notifications_and_metrics_are_captured() {
        let notifications = RecordingNotificationSink::new();
        notifications.publish("t", "m", "s").await.unwrap();
        assert_eq!(notifications.published()[0].subject, "s");

        let metrics = RecordingMetricsSink::new();
        let datum = MetricDatum {
            name: "HealthCheck".to_string(),
            value: 1.0,
            unit: MetricUnit::Count,
            namespace: "VentaroAI".to_string(),
            dimensions: Vec::new(),
            timestamp: Timestamp::now(),
        };
        metrics.record(&datum).await.unwrap();
        assert_eq!(metrics.recorded(), vec![datum]);
    }
}
