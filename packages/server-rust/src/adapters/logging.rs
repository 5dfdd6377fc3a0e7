//! Sinks that accept every call and log it through `tracing`.

use async_trait::async_trait;
use tracing::info;
use ventaro_core::{
    MessageAttributes, MessagingSink, MetricDatum, MetricsSink, NotificationSink,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMessagingSink;

#[async_trait]
impl MessagingSink for LoggingMessagingSink {
    async fn send(
        &self,
        destination: &str,
        body: &str,
        attributes: &MessageAttributes,
    ) -> anyhow::Result<()> {
        let attributes = attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");
        info!(destination, body, attributes = %attributes, "queue message");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationSink;

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn publish(&self, destination: &str, message: &str, subject: &str) -> anyhow::Result<()> {
        info!(destination, subject, message, "notification");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMetricsSink;

#[async_trait]
impl MetricsSink for LoggingMetricsSink {
    async fn record(&self, datum: &MetricDatum) -> anyhow::Result<()> {
        info!(
            namespace = %datum.namespace,
            metric = %datum.name,
            value = datum.value,
            unit = datum.unit.as_str(),
            timestamp = %datum.timestamp,
            "metric"
        );
        Ok(())
    }
}
