//! Trace event types for intercepted calls
//!
//! This module defines the events recorded by the tracer when a wrapped
//! routine is invoked or when interception deliberately excludes a member.
//! All events implement the `TraceEvent` trait which provides timestamps,
//! correlation IDs, and printable summaries.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Trait for filtering trace events
///
/// Implement this trait to create custom event filters. This trait is used
/// instead of raw closure types to avoid type complexity warnings.
pub trait EventFilterFn: Send + Sync {
    /// Test whether an event passes the filter
    fn matches(&self, event: &dyn TraceEvent) -> bool;
}

/// Implement EventFilterFn for any function that matches the signature
impl<F> EventFilterFn for F
where
    F: Fn(&dyn TraceEvent) -> bool + Send + Sync,
{
    fn matches(&self, event: &dyn TraceEvent) -> bool {
        self(event)
    }
}

/// Base trait for all trace events
pub trait TraceEvent: Send + Sync {
    /// Get the timestamp when the event occurred
    fn timestamp(&self) -> f64;

    /// Get the correlation ID for tracing related events
    fn correlation_id(&self) -> &str;

    /// Get a formatted string summary of the event
    fn printable_summary(&self) -> String;

    /// Get the one-line debug form of the event, if it has one
    ///
    /// Call events render as `DEBUG: <TypeName>.<MemberName>`; events that
    /// are not calls return `None`.
    fn debug_line(&self) -> Option<String> {
        None
    }
}

/// Records the invocation of a wrapped routine
///
/// The qualified name is the original routine's identity as fixed on its
/// defining type, so an inherited member traces under the base type's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallTraceEvent {
    /// Timestamp when the event occurred (Unix timestamp)
    pub timestamp: f64,
    /// UUID string that is copied from cause-to-effect for tracing events
    pub correlation_id: String,
    /// Qualified name of the invoked routine, e.g. `mapping.keys`
    pub qualified_name: String,
    /// Number of positional arguments passed to the call
    pub arg_count: usize,
}

impl TraceEvent for CallTraceEvent {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }

    fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    fn printable_summary(&self) -> String {
        let time_str = format_local_time(self.timestamp);

        let mut summary = format!(
            "[{}] CallTraceEvent (correlation_id: {})\n   Routine: {}",
            time_str, self.correlation_id, self.qualified_name
        );

        if self.arg_count > 0 {
            let plural = if self.arg_count != 1 { "s" } else { "" };
            summary.push_str(&format!("\n   Arguments: {} argument{}", self.arg_count, plural));
        }

        summary
    }

    fn debug_line(&self) -> Option<String> {
        Some(format!("DEBUG: {}", self.qualified_name))
    }
}

/// Records a member deliberately excluded from wrapping
///
/// Emitted when interception runs with the skip policy and encounters a
/// sealed member, so the exclusion is recorded rather than silent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSkippedTraceEvent {
    /// Timestamp when the event occurred (Unix timestamp)
    pub timestamp: f64,
    /// UUID string shared by all events of one interception run
    pub correlation_id: String,
    /// Name of the type being intercepted
    pub type_name: String,
    /// Member name that was left unwrapped
    pub member: String,
    /// Why the member could not be wrapped
    pub reason: String,
}

impl TraceEvent for MemberSkippedTraceEvent {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }

    fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    fn printable_summary(&self) -> String {
        let time_str = format_local_time(self.timestamp);

        format!(
            "[{}] MemberSkippedTraceEvent (correlation_id: {})\n   Member: {}.{}\n   Reason: {}",
            time_str, self.correlation_id, self.type_name, self.member, self.reason
        )
    }
}

fn format_local_time(timestamp: f64) -> String {
    let dt = DateTime::from_timestamp(timestamp as i64, 0)
        .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
        .with_timezone(&Local);
    dt.format("%H:%M:%S%.3f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn current_timestamp() -> f64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs_f64()
    }

    #[test]
    fn test_call_event_debug_line() {
        let event = CallTraceEvent {
            timestamp: current_timestamp(),
            correlation_id: "corr-123".to_string(),
            qualified_name: "mapping.keys".to_string(),
            arg_count: 0,
        };

        assert_eq!(event.debug_line(), Some("DEBUG: mapping.keys".to_string()));
    }

    #[test]
    fn test_call_event_summary_contains_routine() {
        let event = CallTraceEvent {
            timestamp: current_timestamp(),
            correlation_id: "corr-123".to_string(),
            qualified_name: "mapping.get".to_string(),
            arg_count: 2,
        };

        let summary = event.printable_summary();
        assert!(summary.contains("mapping.get"));
        assert!(summary.contains("corr-123"));
        assert!(summary.contains("2 arguments"));
    }

    #[test]
    fn test_call_event_summary_no_args_line_when_zero() {
        let event = CallTraceEvent {
            timestamp: current_timestamp(),
            correlation_id: "corr-123".to_string(),
            qualified_name: "mapping.clear".to_string(),
            arg_count: 0,
        };

        assert!(!event.printable_summary().contains("Arguments"));
    }

    #[test]
    fn test_skipped_event_has_no_debug_line() {
        let event = MemberSkippedTraceEvent {
            timestamp: current_timestamp(),
            correlation_id: "corr-456".to_string(),
            type_name: "sequence".to_string(),
            member: "new".to_string(),
            reason: "sealed construction hook".to_string(),
        };

        assert!(event.debug_line().is_none());
        let summary = event.printable_summary();
        assert!(summary.contains("sequence.new"));
        assert!(summary.contains("sealed construction hook"));
    }

    #[test]
    fn test_call_event_serialization() {
        let event = CallTraceEvent {
            timestamp: 1000.0,
            correlation_id: "corr-789".to_string(),
            qualified_name: "set.add".to_string(),
            arg_count: 1,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("set.add"));

        let back: CallTraceEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.qualified_name, "set.add");
        assert_eq!(back.arg_count, 1);
    }

    #[test]
    fn test_event_filter_fn_closure() {
        let filter = |event: &dyn TraceEvent| event.correlation_id() == "wanted";

        let wanted = CallTraceEvent {
            timestamp: current_timestamp(),
            correlation_id: "wanted".to_string(),
            qualified_name: "mapping.len".to_string(),
            arg_count: 0,
        };
        let other = CallTraceEvent {
            timestamp: current_timestamp(),
            correlation_id: "other".to_string(),
            qualified_name: "mapping.len".to_string(),
            arg_count: 0,
        };

        assert!(EventFilterFn::matches(&filter, &wanted));
        assert!(!EventFilterFn::matches(&filter, &other));
    }
}
