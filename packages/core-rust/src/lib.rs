//! Ventaro core: inbound payload types, domain messages, response envelopes,
//! and the collaborator traits the processor talks to.

pub mod clock;
pub mod envelope;
pub mod fields;
pub mod keys;
pub mod messages;
pub mod traits;
pub mod types;

pub use clock::{ClockSource, FixedClock, SystemClock, Timestamp};
pub use envelope::{EventOutcome, FaultResponse, InvocationOutput, ResponseEnvelope};
pub use fields::Fields;
pub use messages::{
    AiProcessingRequest, AnalyticsEventRecord, DomainMessage, EdgeComputationRequest,
    IotDataRecord, UserCreationRequest,
};
pub use traits::{
    ConfigProvider, Dimension, MessageAttributes, MessagingSink, MetricDatum, MetricUnit,
    MetricsSink, NotificationSink,
};
pub use types::{HttpMethod, InboundEvent, InboundRequest};
