//! Null tracer implementation following the Null Object Pattern
//!
//! This module provides a NullTracer that implements the same sink interface as
//! CallTracer but performs no operations. This eliminates the need for
//! conditional checks in client code.

use super::call_tracer::TraceSink;
use super::trace_events::TraceEvent;

/// A no-op sink that silently discards all tracing operations
///
/// All record methods do nothing and all query methods return empty results.
pub struct NullTracer;

impl NullTracer {
    /// Create a new null tracer
    pub fn new() -> Self {
        Self
    }

    /// Return an empty vector for any get_event_summaries request
    pub fn get_event_summaries(
        &self,
        _start_time: Option<f64>,
        _end_time: Option<f64>,
        _filter_func: Option<&dyn Fn(&dyn TraceEvent) -> bool>,
    ) -> Vec<String> {
        Vec::new()
    }

    /// Return an empty vector for any get_last_n_summaries request
    pub fn get_last_n_summaries(
        &self,
        _n: usize,
        _filter_func: Option<&dyn Fn(&dyn TraceEvent) -> bool>,
    ) -> Vec<String> {
        Vec::new()
    }

    /// Return an empty vector for any debug_lines request
    pub fn debug_lines(&self) -> Vec<String> {
        Vec::new()
    }

    /// Return 0 for any count_events request
    pub fn count_events(
        &self,
        _start_time: Option<f64>,
        _end_time: Option<f64>,
        _filter_func: Option<&dyn Fn(&dyn TraceEvent) -> bool>,
    ) -> usize {
        0
    }

    /// Always returns 0 for null tracer
    pub fn len(&self) -> usize {
        0
    }

    /// Always returns true for null tracer
    pub fn is_empty(&self) -> bool {
        true
    }
}

impl Default for NullTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSink for NullTracer {
    fn record_call(&self, _qualified_name: &str, _correlation_id: &str, _arg_count: usize) {
        // Do nothing
    }

    fn record_member_skipped(
        &self,
        _type_name: &str,
        _member: &str,
        _reason: &str,
        _correlation_id: &str,
    ) {
        // Do nothing
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
