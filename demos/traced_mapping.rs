//! Traced mapping demonstration
//!
//! This example intercepts the mapping container type and walks through a
//! short session against one instance. Every member call prints a `DEBUG:`
//! line naming the original routine before the routine runs.
//!
//! # Running the example
//!
//! ```bash
//! cargo run --example traced_mapping
//! ```

use calltrace::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    println!("{}", "=".repeat(80));
    println!("Traced Mapping Demonstration");
    println!("{}", "=".repeat(80));
    println!();

    let tracer = Arc::new(CallTracer::stdout());
    let debug_mapping = traced_mapping_type(tracer)?;

    println!("-- construct {{one: 1, two: 2, three: 3}}");
    let mapping = Instance::new(&debug_mapping, &[json!({"one": 1, "two": 2, "three": 3})])?;
    println!();

    println!("-- keys()");
    let keys = mapping.call("keys", &[])?;
    println!("   => {}", keys);
    println!();

    println!("-- get(\"two\")");
    let two = mapping.call("get", &[json!("two")])?;
    println!("   => {}", two);
    println!();

    println!("-- pop(\"two\")");
    let popped = mapping.call("pop", &[json!("two")])?;
    println!("   => {}", popped);
    println!();

    println!("-- contains(\"two\")");
    let still_there = mapping.call("contains", &[json!("two")])?;
    println!("   => {}", still_there);

    Ok(())
}
