//! The set container type
//!
//! An unordered collection of distinct values, array-backed with equality
//! dedup. Value equality is JSON equality, so any value shape can be a member.

use crate::error::{CalltraceError, Result};
use crate::intercept::InterceptBuilder;
use crate::tracer::TraceSink;
use crate::types::descriptor::{TypeBuilder, TypeDescriptor};
use serde_json::{json, Value};
use std::sync::Arc;

fn array_state<'a>(state: &'a mut Value, member: &str) -> Result<&'a mut Vec<Value>> {
    match state.as_array_mut() {
        Some(items) => Ok(items),
        None => Err(CalltraceError::TypeError(format!(
            "set.{} requires array state",
            member
        ))),
    }
}

fn value_arg(args: &[Value], member: &str) -> Result<Value> {
    args.first().cloned().ok_or_else(|| {
        CalltraceError::ArgumentError(format!("set.{} expects a value argument", member))
    })
}

/// The base set type
///
/// Members: `new`, `add`, `clear`, `contains`, `len`, `remove`.
pub fn set_type() -> Arc<TypeDescriptor> {
    TypeBuilder::new("set")
        .constructor("new", |_state, args| match args {
            [] => Ok(Value::Array(Vec::new())),
            [Value::Array(initial)] => {
                let mut members: Vec<Value> = Vec::new();
                for value in initial {
                    if !members.contains(value) {
                        members.push(value.clone());
                    }
                }
                Ok(Value::Array(members))
            }
            [other] => Err(CalltraceError::TypeError(format!(
                "set.new initial value must be an array, got {}",
                other
            ))),
            _ => Err(CalltraceError::ArgumentError(
                "set.new expects at most 1 argument".to_string(),
            )),
        })
        .method("add", |state, args| {
            let value = value_arg(args, "add")?;
            let members = array_state(state, "add")?;
            if members.contains(&value) {
                Ok(json!(false))
            } else {
                members.push(value);
                Ok(json!(true))
            }
        })
        .method("clear", |state, _args| {
            array_state(state, "clear")?.clear();
            Ok(Value::Null)
        })
        .method("contains", |state, args| {
            let value = value_arg(args, "contains")?;
            Ok(json!(array_state(state, "contains")?.contains(&value)))
        })
        .method("len", |state, _args| {
            Ok(json!(array_state(state, "len")?.len()))
        })
        .method("remove", |state, args| {
            let value = value_arg(args, "remove")?;
            let members = array_state(state, "remove")?;
            match members.iter().position(|m| m == &value) {
                Some(index) => {
                    members.remove(index);
                    Ok(Value::Null)
                }
                None => Err(CalltraceError::KeyError(value.to_string())),
            }
        })
        .build()
}

/// The intercepted set type
pub fn traced_set_type(sink: Arc<dyn TraceSink>) -> Result<Arc<TypeDescriptor>> {
    InterceptBuilder::new(set_type()).sink(sink).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::CallTracer;
    use crate::types::Instance;
    use serde_json::json;

    #[test]
    fn test_new_dedups_initial_members() {
        let ty = set_type();
        let instance = Instance::new(&ty, &[json!([1, 2, 2, 3, 1])]).unwrap();
        assert_eq!(instance.call("len", &[]).unwrap(), json!(3));
    }

    #[test]
    fn test_new_rejects_non_array() {
        let ty = set_type();
        let err = Instance::new(&ty, &[json!({"a": 1})]).unwrap_err();
        assert!(matches!(err, CalltraceError::TypeError(_)));
    }

    #[test]
    fn test_add_reports_novelty() {
        let ty = set_type();
        let instance = Instance::new(&ty, &[]).unwrap();

        assert_eq!(instance.call("add", &[json!("a")]).unwrap(), json!(true));
        assert_eq!(instance.call("add", &[json!("a")]).unwrap(), json!(false));
        assert_eq!(instance.call("len", &[]).unwrap(), json!(1));
    }

    #[test]
    fn test_contains() {
        let ty = set_type();
        let instance = Instance::new(&ty, &[json!([1, "two", [3]])]).unwrap();

        assert_eq!(instance.call("contains", &[json!("two")]).unwrap(), json!(true));
        assert_eq!(instance.call("contains", &[json!([3])]).unwrap(), json!(true));
        assert_eq!(instance.call("contains", &[json!(4)]).unwrap(), json!(false));
    }

    #[test]
    fn test_remove_present() {
        let ty = set_type();
        let instance = Instance::new(&ty, &[json!([1, 2, 3])]).unwrap();

        instance.call("remove", &[json!(2)]).unwrap();
        assert_eq!(instance.call("contains", &[json!(2)]).unwrap(), json!(false));
        assert_eq!(instance.call("len", &[]).unwrap(), json!(2));
    }

    #[test]
    fn test_remove_absent_errors() {
        let ty = set_type();
        let instance = Instance::new(&ty, &[json!([1])]).unwrap();

        let err = instance.call("remove", &[json!(9)]).unwrap_err();
        match err {
            CalltraceError::KeyError(value) => assert_eq!(value, "9"),
            other => panic!("Expected KeyError, got {:?}", other),
        }
    }

    #[test]
    fn test_clear() {
        let ty = set_type();
        let instance = Instance::new(&ty, &[json!([1, 2])]).unwrap();

        instance.call("clear", &[]).unwrap();
        assert_eq!(instance.call("len", &[]).unwrap(), json!(0));
    }

    #[test]
    fn test_add_requires_argument() {
        let ty = set_type();
        let instance = Instance::new(&ty, &[]).unwrap();

        let err = instance.call("add", &[]).unwrap_err();
        assert!(matches!(err, CalltraceError::ArgumentError(_)));
    }

    #[test]
    fn test_traced_set_errors_pass_through() {
        let tracer = Arc::new(CallTracer::default());
        let ty = traced_set_type(tracer.clone()).unwrap();
        let instance = Instance::new(&ty, &[json!([1])]).unwrap();

        let err = instance.call("remove", &[json!(9)]).unwrap_err();
        assert!(matches!(err, CalltraceError::KeyError(_)));

        // The failed call was still traced
        assert_eq!(
            tracer.debug_lines(),
            vec!["DEBUG: set.new", "DEBUG: set.remove"]
        );
    }
}
