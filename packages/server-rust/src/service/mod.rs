//! Invocation processing.
//!
//! The pipeline for one raw payload:
//!
//! 1. **Classification** (`classify`): `Value` -> `Result<Invocation, ClassifyError>`
//! 2. **Routing** (`router`, `events`): first-match prefix table for requests,
//!    `(source, detail-type)` dispatch for events
//! 3. **Middleware** (`middleware`): Tower layers (deadline, instrumentation)
//!    around each request handler
//! 4. **Domain handlers** (`domain`): one per route prefix
//! 5. **Outbound** (`outbound`): best-effort calls to the collaborators
//!
//! [`Processor`] ties the stages together and is the outermost fault boundary.

pub mod classify;
pub mod config;
pub mod domain;
pub mod events;
pub mod middleware;
pub mod operation;
pub mod outbound;
pub mod processor;
pub mod router;

// Re-export key types for convenient access.
pub use classify::InvocationService;
pub use config::{ProcessorArgs, ProcessorConfig};
pub use events::{EventKind, EventRouter};
pub use operation::{
    handler_names, ApiCall, CallContext, ClassifyError, HandlerError, Invocation,
    InvocationContext, OperationError,
};
pub use outbound::{Collaborators, Outbound};
pub use processor::Processor;
pub use router::RequestRouter;
