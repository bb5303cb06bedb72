//! The mapping container type
//!
//! A key-value container in the shape of a dictionary: string keys, arbitrary
//! values, object-backed state. Serves as the primary demonstration subject
//! for interception; `traced_mapping_type` is the ready-made intercepted
//! variant.

use crate::error::{CalltraceError, Result};
use crate::intercept::InterceptBuilder;
use crate::tracer::TraceSink;
use crate::types::descriptor::{TypeBuilder, TypeDescriptor};
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn object_state<'a>(state: &'a mut Value, member: &str) -> Result<&'a mut Map<String, Value>> {
    match state.as_object_mut() {
        Some(map) => Ok(map),
        None => Err(CalltraceError::TypeError(format!(
            "mapping.{} requires object state",
            member
        ))),
    }
}

fn key_arg(args: &[Value], member: &str) -> Result<String> {
    match args.first() {
        Some(Value::String(key)) => Ok(key.clone()),
        Some(other) => Err(CalltraceError::TypeError(format!(
            "mapping.{} key must be a string, got {}",
            member, other
        ))),
        None => Err(CalltraceError::ArgumentError(format!(
            "mapping.{} expects a key argument",
            member
        ))),
    }
}

/// The base mapping type
///
/// Members: `new`, `clear`, `contains`, `get`, `insert`, `items`, `keys`,
/// `len`, `pop`, `values`.
pub fn mapping_type() -> Arc<TypeDescriptor> {
    TypeBuilder::new("mapping")
        .constructor("new", |_state, args| match args {
            [] => Ok(Value::Object(Map::new())),
            [Value::Object(initial)] => Ok(Value::Object(initial.clone())),
            [other] => Err(CalltraceError::TypeError(format!(
                "mapping.new initial value must be an object, got {}",
                other
            ))),
            _ => Err(CalltraceError::ArgumentError(
                "mapping.new expects at most 1 argument".to_string(),
            )),
        })
        .method("clear", |state, _args| {
            object_state(state, "clear")?.clear();
            Ok(Value::Null)
        })
        .method("contains", |state, args| {
            let key = key_arg(args, "contains")?;
            Ok(json!(object_state(state, "contains")?.contains_key(&key)))
        })
        .method("get", |state, args| {
            let key = key_arg(args, "get")?;
            let default = args.get(1).cloned().unwrap_or(Value::Null);
            Ok(object_state(state, "get")?.get(&key).cloned().unwrap_or(default))
        })
        .method("insert", |state, args| {
            let key = key_arg(args, "insert")?;
            let value = args
                .get(1)
                .cloned()
                .ok_or_else(|| {
                    CalltraceError::ArgumentError("mapping.insert expects a value argument".to_string())
                })?;
            let previous = object_state(state, "insert")?.insert(key, value);
            Ok(previous.unwrap_or(Value::Null))
        })
        .method("items", |state, args| {
            if !args.is_empty() {
                return Err(CalltraceError::ArgumentError(
                    "mapping.items takes no arguments".to_string(),
                ));
            }
            let items: Vec<Value> = object_state(state, "items")?
                .iter()
                .map(|(k, v)| json!([k, v]))
                .collect();
            Ok(Value::Array(items))
        })
        .method("keys", |state, args| {
            if !args.is_empty() {
                return Err(CalltraceError::ArgumentError(
                    "mapping.keys takes no arguments".to_string(),
                ));
            }
            let keys: Vec<Value> =
                object_state(state, "keys")?.keys().map(|k| json!(k)).collect();
            Ok(Value::Array(keys))
        })
        .method("len", |state, _args| {
            Ok(json!(object_state(state, "len")?.len()))
        })
        .method("pop", |state, args| {
            let key = key_arg(args, "pop")?;
            let default = args.get(1).cloned();
            match object_state(state, "pop")?.remove(&key) {
                Some(value) => Ok(value),
                None => default.ok_or(CalltraceError::KeyError(key)),
            }
        })
        .method("values", |state, args| {
            if !args.is_empty() {
                return Err(CalltraceError::ArgumentError(
                    "mapping.values takes no arguments".to_string(),
                ));
            }
            let values: Vec<Value> =
                object_state(state, "values")?.values().cloned().collect();
            Ok(Value::Array(values))
        })
        .build()
}

/// The intercepted mapping type
///
/// Every member of [`mapping_type`] is wrapped; each invocation records one
/// trace on the sink before the original runs.
pub fn traced_mapping_type(sink: Arc<dyn TraceSink>) -> Result<Arc<TypeDescriptor>> {
    InterceptBuilder::new(mapping_type()).sink(sink).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::CallTracer;
    use crate::types::Instance;
    use serde_json::json;

    fn sample() -> crate::types::Instance {
        let ty = mapping_type();
        Instance::new(&ty, &[json!({"one": 1, "two": 2, "three": 3})]).unwrap()
    }

    #[test]
    fn test_new_empty() {
        let ty = mapping_type();
        let instance = Instance::new(&ty, &[]).unwrap();
        assert_eq!(instance.call("len", &[]).unwrap(), json!(0));
    }

    #[test]
    fn test_new_rejects_non_object() {
        let ty = mapping_type();
        let err = Instance::new(&ty, &[json!([1, 2])]).unwrap_err();
        assert!(matches!(err, CalltraceError::TypeError(_)));
    }

    #[test]
    fn test_keys_are_sorted() {
        let instance = sample();
        assert_eq!(
            instance.call("keys", &[]).unwrap(),
            json!(["one", "three", "two"])
        );
    }

    #[test]
    fn test_get_present_and_absent() {
        let instance = sample();
        assert_eq!(instance.call("get", &[json!("two")]).unwrap(), json!(2));
        assert_eq!(instance.call("get", &[json!("four")]).unwrap(), Value::Null);
        assert_eq!(
            instance.call("get", &[json!("four"), json!(0)]).unwrap(),
            json!(0)
        );
    }

    #[test]
    fn test_insert_returns_previous() {
        let instance = sample();
        assert_eq!(
            instance.call("insert", &[json!("one"), json!(10)]).unwrap(),
            json!(1)
        );
        assert_eq!(
            instance.call("insert", &[json!("four"), json!(4)]).unwrap(),
            Value::Null
        );
        assert_eq!(instance.call("len", &[]).unwrap(), json!(4));
    }

    #[test]
    fn test_pop_removes() {
        let instance = sample();
        assert_eq!(instance.call("pop", &[json!("two")]).unwrap(), json!(2));
        assert_eq!(instance.call("contains", &[json!("two")]).unwrap(), json!(false));
    }

    #[test]
    fn test_pop_absent_key_errors() {
        let instance = sample();
        let err = instance.call("pop", &[json!("four")]).unwrap_err();
        match err {
            CalltraceError::KeyError(key) => assert_eq!(key, "four"),
            other => panic!("Expected KeyError, got {:?}", other),
        }
    }

    #[test]
    fn test_pop_absent_key_with_default() {
        let instance = sample();
        assert_eq!(
            instance.call("pop", &[json!("four"), json!(-1)]).unwrap(),
            json!(-1)
        );
    }

    #[test]
    fn test_contains() {
        let instance = sample();
        assert_eq!(instance.call("contains", &[json!("one")]).unwrap(), json!(true));
        assert_eq!(instance.call("contains", &[json!("four")]).unwrap(), json!(false));
    }

    #[test]
    fn test_contains_requires_string_key() {
        let instance = sample();
        let err = instance.call("contains", &[json!(1)]).unwrap_err();
        assert!(matches!(err, CalltraceError::TypeError(_)));
    }

    #[test]
    fn test_items_and_values() {
        let instance = sample();
        assert_eq!(
            instance.call("items", &[]).unwrap(),
            json!([["one", 1], ["three", 3], ["two", 2]])
        );
        assert_eq!(instance.call("values", &[]).unwrap(), json!([1, 3, 2]));
    }

    #[test]
    fn test_clear() {
        let instance = sample();
        instance.call("clear", &[]).unwrap();
        assert_eq!(instance.call("len", &[]).unwrap(), json!(0));
    }

    #[test]
    fn test_keys_rejects_arguments() {
        let instance = sample();
        let err = instance.call("keys", &[json!("extra")]).unwrap_err();
        assert!(matches!(err, CalltraceError::ArgumentError(_)));
    }

    #[test]
    fn test_traced_membership_miss() {
        let tracer = Arc::new(CallTracer::default());
        let ty = traced_mapping_type(tracer.clone()).unwrap();
        let instance = Instance::new(&ty, &[json!({"one": 1})]).unwrap();

        let result = instance.call("contains", &[json!("two")]).unwrap();

        // One trace line for the membership test, and a false result
        assert_eq!(result, json!(false));
        assert_eq!(
            tracer.debug_lines(),
            vec!["DEBUG: mapping.new", "DEBUG: mapping.contains"]
        );
    }
}
