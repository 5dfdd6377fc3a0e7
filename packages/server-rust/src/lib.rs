//! Ventaro processor: routes API requests and event-bus events onto queues,
//! notifications and metrics.

pub mod adapters;
pub mod network;
pub mod service;
pub mod telemetry;

pub use service::{Collaborators, Processor, ProcessorArgs, ProcessorConfig};
