use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::fields::Fields;

/// Named parameter and secret lookup (parameter store, secrets manager).
///
/// `Ok(None)` means the name does not exist. `Err` is reserved for the
/// provider itself failing (network, permissions).
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Resolve a parameter. `decrypt` asks for secure-string decryption.
    async fn get_parameter(&self, name: &str, decrypt: bool) -> anyhow::Result<Option<String>>;

    /// Resolve a secret whose value is a JSON object.
    async fn get_secret(&self, name: &str) -> anyhow::Result<Option<Fields>>;
}

/// String attributes sent alongside a queued message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAttributes(BTreeMap<String, String>);

impl MessageAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an attribute.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Queue sender. Fire-and-forget: no delivery guarantee beyond the call
/// returning `Ok`.
#[async_trait]
pub trait MessagingSink: Send + Sync {
    async fn send(
        &self,
        destination: &str,
        body: &str,
        attributes: &MessageAttributes,
    ) -> anyhow::Result<()>;
}

/// Topic publisher.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, destination: &str, message: &str, subject: &str) -> anyhow::Result<()>;
}

/// Unit of a metric data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MetricUnit {
    #[default]
    Count,
    Seconds,
    Milliseconds,
    Bytes,
    Percent,
    None,
}

impl MetricUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Seconds => "Seconds",
            Self::Milliseconds => "Milliseconds",
            Self::Bytes => "Bytes",
            Self::Percent => "Percent",
            Self::None => "None",
        }
    }
}

/// A name/value pair qualifying a metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One metric data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDatum {
    pub name: String,
    pub value: f64,
    pub unit: MetricUnit,
    pub namespace: String,
    pub dimensions: Vec<Dimension>,
    pub timestamp: Timestamp,
}

/// Metric recorder. Failures are never allowed to change a response.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn record(&self, datum: &MetricDatum) -> anyhow::Result<()>;
}
