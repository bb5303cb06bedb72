//! Trace summary demonstration
//!
//! This example runs a scripted session against all three intercepted
//! container types with a storing tracer, then prints a summary of every
//! recorded event. The sequence type's sealed construction hook is excluded
//! under the skip policy; enable warnings (RUST_LOG=warn) to see the log line
//! recorded for it, and look for the MemberSkippedTraceEvent in the summary.
//!
//! # Running the example
//!
//! ```bash
//! RUST_LOG=warn cargo run --example trace_summary
//! ```

use calltrace::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "=".repeat(80));
    println!("Trace Summary Demonstration");
    println!("{}", "=".repeat(80));
    println!();

    // A storing tracer with no stdout echo; events are queried at the end
    let tracer = Arc::new(CallTracer::default());

    let mapping_ty = traced_mapping_type(tracer.clone())?;
    let set_ty = traced_set_type(tracer.clone())?;
    let sequence_ty = traced_sequence_type(tracer.clone())?;

    let mapping = Instance::new(&mapping_ty, &[json!({"one": 1, "two": 2})])?;
    mapping.call("insert", &[json!("three"), json!(3)])?;
    mapping.call("keys", &[])?;
    mapping.call("pop", &[json!("one")])?;

    let set = Instance::new(&set_ty, &[json!([1, 2, 2, 3])])?;
    set.call("add", &[json!(4)])?;
    set.call("contains", &[json!(2)])?;

    // Constructed untraced (the sealed hook was skipped); members still trace
    let sequence = Instance::new(&sequence_ty, &[json!(["a", "b", "a"])])?;
    sequence.call("count", &[json!("a")])?;
    sequence.call("get", &[json!(1)])?;

    println!("Recorded {} events:", tracer.len());
    println!();

    for summary in tracer.get_event_summaries(None, None, None) {
        println!("{}", summary);
        println!();
    }

    Ok(())
}
