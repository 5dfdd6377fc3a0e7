//! Tower middleware layers for the request-handler pipeline.
//!
//! - [`timeout`]: Per-call deadline enforcement
//! - [`metrics`]: Handler timing and outcome via `tracing` spans and the
//!   `metrics` facade
//! - [`pipeline`]: Composes all layers into a single service stack

pub mod metrics;
pub mod pipeline;
pub mod timeout;

pub use self::metrics::MetricsLayer;
pub use pipeline::build_handler_pipeline;
pub use timeout::TimeoutLayer;
