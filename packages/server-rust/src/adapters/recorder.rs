//! `MetricsSink` backed by the `metrics` facade.
//!
//! Count data points increment a counter; every other unit records a
//! histogram sample. The namespace and each dimension become labels.

use async_trait::async_trait;
use metrics::Label;
use ventaro_core::{MetricDatum, MetricUnit, MetricsSink};

#[derive(Debug, Clone, Copy, Default)]
pub struct RecorderMetricsSink;

impl RecorderMetricsSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn labels(datum: &MetricDatum) -> Vec<Label> {
        std::iter::once(Label::new("namespace", datum.namespace.clone()))
            .chain(
                datum
                    .dimensions
                    .iter()
                    .map(|d| Label::new(d.name.clone(), d.value.clone())),
            )
            .collect()
    }
}

#[async_trait]
impl MetricsSink for RecorderMetricsSink {
    async fn record(&self, datum: &MetricDatum) -> anyhow::Result<()> {
        let name = datum.name.clone();
        let labels = Self::labels(datum);
        match datum.unit {
            MetricUnit::Count => {
                if !datum.value.is_finite() || datum.value < 0.0 {
                    anyhow::bail!("count metric {} has invalid value {}", datum.name, datum.value);
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let increment = datum.value.round() as u64;
                metrics::counter!(name, labels).increment(increment);
            }
            _ => metrics::histogram!(name, labels).record(datum.value),
        }
        Ok(())
    }
}
