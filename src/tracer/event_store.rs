//! Event storage with callbacks and filtering
//!
//! This module provides thread-safe event storage with support for callbacks,
//! filtering by time range, and custom predicates.

use super::trace_events::TraceEvent;
use std::sync::{Arc, Mutex};

/// Type alias for event callback functions
pub type EventCallback = Arc<dyn Fn(&dyn TraceEvent) + Send + Sync>;

/// Store for capturing and querying trace events
///
/// EventStore provides thread-safe storage for trace events with support for:
/// - Callbacks triggered on each stored event
/// - Filtering by time range
/// - Custom filter predicates
/// - Query for last N events
pub struct EventStore {
    events: Arc<Mutex<Vec<Box<dyn TraceEvent>>>>,
    on_store_callback: Option<EventCallback>,
}

impl EventStore {
    /// Create a new event store
    ///
    /// # Arguments
    ///
    /// * `on_store_callback` - Optional callback function called whenever an event is stored
    pub fn new(on_store_callback: Option<EventCallback>) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            on_store_callback,
        }
    }

    /// Store an event in the event store
    ///
    /// If a callback is configured, it will be called with the stored event.
    pub fn store(&self, event: Box<dyn TraceEvent>) {
        // Trigger callback before storing (if exists)
        if let Some(callback) = &self.on_store_callback {
            callback(event.as_ref());
        }

        let mut events = self.events.lock().unwrap();
        events.push(event);
    }

    /// Count events matching filters
    ///
    /// # Arguments
    ///
    /// * `start_time` - Include events with timestamp >= start_time
    /// * `end_time` - Include events with timestamp <= end_time
    /// * `filter_func` - Custom filter function to apply to events
    #[allow(clippy::type_complexity)]
    pub fn count_events(
        &self,
        start_time: Option<f64>,
        end_time: Option<f64>,
        filter_func: Option<&dyn Fn(&dyn TraceEvent) -> bool>,
    ) -> usize {
        let events = self.events.lock().unwrap();
        let mut count = 0;

        for event in events.iter() {
            let event_ref = event.as_ref();

            if !passes_filters(event_ref, start_time, end_time, filter_func) {
                continue;
            }

            count += 1;
        }

        count
    }

    /// Get summaries of events matching filters
    ///
    /// Returns printable summaries instead of cloning events
    ///
    /// # Arguments
    ///
    /// * `start_time` - Include events with timestamp >= start_time
    /// * `end_time` - Include events with timestamp <= end_time
    /// * `filter_func` - Custom filter function to apply to events
    #[allow(clippy::type_complexity)]
    pub fn get_event_summaries(
        &self,
        start_time: Option<f64>,
        end_time: Option<f64>,
        filter_func: Option<&dyn Fn(&dyn TraceEvent) -> bool>,
    ) -> Vec<String> {
        let events = self.events.lock().unwrap();
        let mut result = Vec::new();

        for event in events.iter() {
            let event_ref = event.as_ref();

            if !passes_filters(event_ref, start_time, end_time, filter_func) {
                continue;
            }

            result.push(event_ref.printable_summary());
        }

        result
    }

    /// Get the debug lines of stored call events, in store order
    ///
    /// Events without a debug form (e.g. skipped-member records) are omitted.
    pub fn debug_lines(&self) -> Vec<String> {
        let events = self.events.lock().unwrap();
        events.iter().filter_map(|e| e.as_ref().debug_line()).collect()
    }

    /// Get the last N event summaries, optionally filtered
    ///
    /// # Arguments
    ///
    /// * `n` - Number of events to return
    /// * `filter_func` - Optional custom filter function
    #[allow(clippy::type_complexity)]
    pub fn get_last_n_summaries(
        &self,
        n: usize,
        filter_func: Option<&dyn Fn(&dyn TraceEvent) -> bool>,
    ) -> Vec<String> {
        let events = self.events.lock().unwrap();

        let filtered: Vec<_> = if let Some(filter) = filter_func {
            events.iter().filter(|e| filter(e.as_ref())).collect()
        } else {
            events.iter().collect()
        };

        let start_idx = if n < filtered.len() {
            filtered.len() - n
        } else {
            0
        };

        filtered[start_idx..].iter().map(|e| e.as_ref().printable_summary()).collect()
    }

    /// Clear all events from the store
    pub fn clear(&self) {
        let mut events = self.events.lock().unwrap();
        events.clear();
    }

    /// Get the total number of events in the store
    pub fn len(&self) -> usize {
        let events = self.events.lock().unwrap();
        events.len()
    }

    /// Check if the event store is empty
    pub fn is_empty(&self) -> bool {
        let events = self.events.lock().unwrap();
        events.is_empty()
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new(None)
    }
}

fn passes_filters(
    event: &dyn TraceEvent,
    start_time: Option<f64>,
    end_time: Option<f64>,
    filter_func: Option<&dyn Fn(&dyn TraceEvent) -> bool>,
) -> bool {
    if let Some(start) = start_time {
        if event.timestamp() < start {
            return false;
        }
    }

    if let Some(end) = end_time {
        if event.timestamp() > end {
            return false;
        }
    }

    if let Some(filter) = filter_func {
        if !filter(event) {
            return false;
        }
    }

    true
}
