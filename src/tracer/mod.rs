//! Tracer system for observability of intercepted calls
//!
//! The tracer records one event per wrapped invocation, with timestamps and
//! correlation IDs, and exposes the stored events for debugging and assertions.
//!
//! # Architecture
//!
//! The tracer system consists of several key components:
//!
//! - **TraceEvent**: Base trait for all event types with timestamps and correlation IDs
//! - **EventStore**: Thread-safe storage for events with callbacks and filtering
//! - **TraceSink**: The interface wrapped routines record through
//! - **CallTracer**: Standard sink backed by an event store, with an optional stdout echo
//! - **NullTracer**: Null object pattern for when tracing is disabled
//!
//! # Event Types
//!
//! - **CallTraceEvent**: Records the invocation of a wrapped routine; its debug
//!   line is the external `DEBUG: <TypeName>.<MemberName>` trace format
//! - **MemberSkippedTraceEvent**: Records a member deliberately excluded from
//!   wrapping under the skip policy
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use calltrace::tracer::CallTracer;
//! use std::sync::Arc;
//!
//! // Create a tracer that echoes debug lines to stdout
//! let tracer = Arc::new(CallTracer::stdout());
//!
//! // ... intercept a type with this tracer and call its members ...
//!
//! // Query events
//! for summary in tracer.get_event_summaries(None, None, None) {
//!     println!("{}", summary);
//! }
//! ```
//!
//! # Correlation IDs
//!
//! Correlation IDs are UUIDs that are copied from cause-to-effect across the
//! system: every call made through one instance carries that instance's id, and
//! every skip recorded by one interception run carries that run's id.

pub mod call_tracer;
pub mod event_store;
pub mod null_tracer;
pub mod trace_events;

// Re-export main types
pub use call_tracer::{CallTracer, TraceSink};
pub use event_store::{EventCallback, EventStore};
pub use null_tracer::NullTracer;
pub use trace_events::{CallTraceEvent, EventFilterFn, MemberSkippedTraceEvent, TraceEvent};
