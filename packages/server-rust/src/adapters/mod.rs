//! Bundled collaborator implementations.
//!
//! - [`parameters`]: environment-backed and in-memory `ConfigProvider`s
//! - [`recording`]: in-memory sinks that capture every call
//! - [`logging`]: sinks that accept everything and log it
//! - [`recorder`]: `MetricsSink` forwarding to the `metrics` facade

pub mod logging;
pub mod parameters;
pub mod recorder;
pub mod recording;

pub use logging::{LoggingMessagingSink, LoggingMetricsSink, LoggingNotificationSink};
pub use parameters::{EnvParameterStore, StaticParameterStore};
pub use recorder::RecorderMetricsSink;
pub use recording::{
    PublishedNotification, RecordingMessagingSink, RecordingMetricsSink,
    RecordingNotificationSink, SentMessage,
};
