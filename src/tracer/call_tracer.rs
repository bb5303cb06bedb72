//! The standard trace sink for intercepted calls
//!
//! This module provides the central sink for recording, filtering, and querying
//! trace events. It coordinates with the event store and provides convenience
//! constructors for the common stdout-echo configuration.

use super::event_store::{EventCallback, EventStore};
use super::trace_events::{CallTraceEvent, MemberSkippedTraceEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Sink that receives trace records from wrapped routines
///
/// Wrappers hold the sink as a trait object so the null tracer can stand in
/// wherever a real tracer would go.
pub trait TraceSink: Send + Sync {
    /// Record the invocation of a wrapped routine
    fn record_call(&self, qualified_name: &str, correlation_id: &str, arg_count: usize);

    /// Record a member deliberately excluded from wrapping
    fn record_member_skipped(
        &self,
        type_name: &str,
        member: &str,
        reason: &str,
        correlation_id: &str,
    );

    /// Check if the sink is recording
    fn is_enabled(&self) -> bool;
}

/// Central sink for capturing and querying call trace events
///
/// The CallTracer records one event per wrapped invocation, providing a way to
/// trace through the calls made against an intercepted type.
pub struct CallTracer {
    event_store: Arc<EventStore>,
    enabled: Arc<AtomicBool>,
}

impl CallTracer {
    /// Create a new call tracer
    ///
    /// # Arguments
    ///
    /// * `event_store` - Optional event store to use. If None, a new one will be created.
    /// * `enabled` - Whether the tracer is enabled (default: true)
    pub fn new(event_store: Option<Arc<EventStore>>, enabled: bool) -> Self {
        Self {
            event_store: event_store.unwrap_or_else(|| Arc::new(EventStore::default())),
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    /// Create a tracer that echoes each call's debug line to standard output
    ///
    /// The echo happens at record time, before the wrapped routine runs, so
    /// output interleaving is governed by stdout's own line buffering.
    pub fn stdout() -> Self {
        let callback: EventCallback = Arc::new(|event| {
            if let Some(line) = event.debug_line() {
                println!("{}", line);
            }
        });
        Self::new(Some(Arc::new(EventStore::new(Some(callback)))), true)
    }

    /// Check if the tracer is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Enable the tracer
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    /// Disable the tracer
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Record a call event
    ///
    /// # Arguments
    ///
    /// * `qualified_name` - Qualified name of the invoked routine (e.g. `mapping.keys`)
    /// * `correlation_id` - UUID string for tracing related events
    /// * `arg_count` - Number of positional arguments in the call
    pub fn record_call(
        &self,
        qualified_name: impl Into<String>,
        correlation_id: impl Into<String>,
        arg_count: usize,
    ) {
        if !self.is_enabled() {
            return;
        }

        let event = Box::new(CallTraceEvent {
            timestamp: current_timestamp(),
            correlation_id: correlation_id.into(),
            qualified_name: qualified_name.into(),
            arg_count,
        });

        self.event_store.store(event);
    }

    /// Record a member excluded from wrapping
    ///
    /// # Arguments
    ///
    /// * `type_name` - Name of the type being intercepted
    /// * `member` - Member name left unwrapped
    /// * `reason` - Why the member could not be wrapped
    /// * `correlation_id` - UUID string shared by all events of one interception run
    pub fn record_member_skipped(
        &self,
        type_name: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
        correlation_id: impl Into<String>,
    ) {
        if !self.is_enabled() {
            return;
        }

        let event = Box::new(MemberSkippedTraceEvent {
            timestamp: current_timestamp(),
            correlation_id: correlation_id.into(),
            type_name: type_name.into(),
            member: member.into(),
            reason: reason.into(),
        });

        self.event_store.store(event);
    }

    /// Get event summaries from the store, optionally filtered
    ///
    /// # Arguments
    ///
    /// * `start_time` - Include events with timestamp >= start_time
    /// * `end_time` - Include events with timestamp <= end_time
    /// * `filter_func` - Custom filter function to apply to events
    pub fn get_event_summaries(
        &self,
        start_time: Option<f64>,
        end_time: Option<f64>,
        filter_func: Option<&dyn Fn(&dyn super::TraceEvent) -> bool>,
    ) -> Vec<String> {
        self.event_store.get_event_summaries(start_time, end_time, filter_func)
    }

    /// Get the last N event summaries, optionally filtered
    pub fn get_last_n_summaries(
        &self,
        n: usize,
        filter_func: Option<&dyn Fn(&dyn super::TraceEvent) -> bool>,
    ) -> Vec<String> {
        self.event_store.get_last_n_summaries(n, filter_func)
    }

    /// Get the debug lines of recorded call events, in record order
    pub fn debug_lines(&self) -> Vec<String> {
        self.event_store.debug_lines()
    }

    /// Count events matching filters
    pub fn count_events(
        &self,
        start_time: Option<f64>,
        end_time: Option<f64>,
        filter_func: Option<&dyn Fn(&dyn super::TraceEvent) -> bool>,
    ) -> usize {
        self.event_store.count_events(start_time, end_time, filter_func)
    }

    /// Clear all events from the event store
    pub fn clear(&self) {
        self.event_store.clear();
    }

    /// Get the total number of events in the store
    pub fn len(&self) -> usize {
        self.event_store.len()
    }

    /// Check if the event store is empty
    pub fn is_empty(&self) -> bool {
        self.event_store.is_empty()
    }
}

impl Default for CallTracer {
    fn default() -> Self {
        Self::new(None, true)
    }
}

impl TraceSink for CallTracer {
    fn record_call(&self, qualified_name: &str, correlation_id: &str, arg_count: usize) {
        CallTracer::record_call(self, qualified_name, correlation_id, arg_count);
    }

    fn record_member_skipped(
        &self,
        type_name: &str,
        member: &str,
        reason: &str,
        correlation_id: &str,
    ) {
        CallTracer::record_member_skipped(self, type_name, member, reason, correlation_id);
    }

    fn is_enabled(&self) -> bool {
        CallTracer::is_enabled(self)
    }
}

/// Get current timestamp as Unix timestamp (seconds since epoch)
fn current_timestamp() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs_f64()
}
