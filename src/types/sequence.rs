//! The sequence container type
//!
//! An immutable fixed-size sequence in the shape of a tuple. Its construction
//! hook is sealed: the type disallows member replacement for `new`, so it is
//! the one member the interception facility cannot wrap. `traced_sequence_type`
//! pins the skip policy for that member; the constructor stays callable but
//! untraced, and the exclusion is recorded on the sink.

use crate::error::{CalltraceError, Result};
use crate::intercept::{InterceptBuilder, SealedMemberPolicy};
use crate::tracer::TraceSink;
use crate::types::descriptor::{TypeBuilder, TypeDescriptor};
use serde_json::{json, Value};
use std::sync::Arc;

fn items_state<'a>(state: &'a mut Value, member: &str) -> Result<&'a mut Vec<Value>> {
    match state.as_array_mut() {
        Some(items) => Ok(items),
        None => Err(CalltraceError::TypeError(format!(
            "sequence.{} requires array state",
            member
        ))),
    }
}

fn value_arg(args: &[Value], member: &str) -> Result<Value> {
    args.first().cloned().ok_or_else(|| {
        CalltraceError::ArgumentError(format!("sequence.{} expects a value argument", member))
    })
}

/// The base sequence type
///
/// Members: `new` (sealed), `contains`, `count`, `get`, `len`. No member
/// mutates the state after construction.
pub fn sequence_type() -> Arc<TypeDescriptor> {
    TypeBuilder::new("sequence")
        .sealed_constructor("new", |_state, args| match args {
            [] => Ok(Value::Array(Vec::new())),
            [Value::Array(items)] => Ok(Value::Array(items.clone())),
            [other] => Err(CalltraceError::TypeError(format!(
                "sequence.new initial value must be an array, got {}",
                other
            ))),
            _ => Err(CalltraceError::ArgumentError(
                "sequence.new expects at most 1 argument".to_string(),
            )),
        })
        .method("contains", |state, args| {
            let value = value_arg(args, "contains")?;
            Ok(json!(items_state(state, "contains")?.contains(&value)))
        })
        .method("count", |state, args| {
            let value = value_arg(args, "count")?;
            let count = items_state(state, "count")?.iter().filter(|m| **m == value).count();
            Ok(json!(count))
        })
        .method("get", |state, args| {
            let index = match args.first() {
                Some(value) => value.as_u64().ok_or_else(|| {
                    CalltraceError::TypeError(format!(
                        "sequence.get index must be a non-negative integer, got {}",
                        value
                    ))
                })? as usize,
                None => {
                    return Err(CalltraceError::ArgumentError(
                        "sequence.get expects an index argument".to_string(),
                    ))
                }
            };
            let items = items_state(state, "get")?;
            items
                .get(index)
                .cloned()
                .ok_or(CalltraceError::IndexError { index, len: items.len() })
        })
        .method("len", |state, _args| {
            Ok(json!(items_state(state, "len")?.len()))
        })
        .build()
}

/// The intercepted sequence type
///
/// The sealed `new` member is deliberately excluded from wrapping (skip
/// policy): construction works but is not traced, and a member-skipped event
/// is recorded on the sink at interception time. Use [`InterceptBuilder`]
/// directly with [`SealedMemberPolicy::Fail`] to get the failing behavior
/// instead.
pub fn traced_sequence_type(sink: Arc<dyn TraceSink>) -> Result<Arc<TypeDescriptor>> {
    InterceptBuilder::new(sequence_type())
        .sink(sink)
        .sealed_member_policy(SealedMemberPolicy::Skip)
        .build()
}
