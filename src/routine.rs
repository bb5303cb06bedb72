use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Kind of a routine member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineKind {
    /// Ordinary method invoked against existing instance state
    Method,
    /// Construction hook producing the initial instance state
    Constructor,
}

/// Identity metadata for a routine
///
/// The qualified name is fixed when the routine is registered on its defining
/// type (e.g. `mapping.keys`) and survives wrapping unchanged, so trace output
/// always names the original implementation. A sealed routine belongs to a
/// type that disallows member replacement and cannot be rebound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineDescriptor {
    pub name: String,
    pub qualified_name: String,
    pub kind: RoutineKind,
    pub sealed: bool,
}

impl RoutineDescriptor {
    /// Create a descriptor for an ordinary method
    pub fn method(type_name: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            qualified_name: format!("{}.{}", type_name, name),
            kind: RoutineKind::Method,
            sealed: false,
        }
    }

    /// Create a descriptor for a construction hook
    pub fn constructor(type_name: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            qualified_name: format!("{}.{}", type_name, name),
            kind: RoutineKind::Constructor,
            sealed: false,
        }
    }

    /// Mark this routine as unwrappable
    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }
}

/// Per-call context threaded through every invocation
///
/// Instances stamp their id here so all trace events for one instance share a
/// correlation id.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub correlation_id: String,
}

impl CallContext {
    /// Create a context with a fresh correlation id
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a context with a specific correlation id
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for routine members of a type
///
/// A routine receives the instance state and positional arguments and returns
/// a value. Constructors receive `Value::Null` as state and return the initial
/// state for the new instance.
pub trait Routine: Send + Sync {
    /// Invoke the routine against instance state
    fn invoke(&self, ctx: &CallContext, state: &mut Value, args: &[Value]) -> Result<Value>;

    /// Get the identity metadata for this routine
    fn descriptor(&self) -> RoutineDescriptor;

    /// Check if this routine matches the given member name
    fn matches(&self, name: &str) -> bool {
        self.descriptor().name == name
    }
}

/// Closure-backed routine
///
/// Adapts a plain function or closure into a [`Routine`] by pairing it with a
/// descriptor. This is how the built-in container types register their members.
pub struct FnRoutine {
    descriptor: RoutineDescriptor,
    func: Arc<dyn Fn(&mut Value, &[Value]) -> Result<Value> + Send + Sync>,
}

impl FnRoutine {
    pub fn new<F>(descriptor: RoutineDescriptor, func: F) -> Self
    where
        F: Fn(&mut Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            descriptor,
            func: Arc::new(func),
        }
    }
}

impl Routine for FnRoutine {
    fn invoke(&self, _ctx: &CallContext, state: &mut Value, args: &[Value]) -> Result<Value> {
        (self.func)(state, args)
    }

    fn descriptor(&self) -> RoutineDescriptor {
        self.descriptor.clone()
    }
}

impl std::fmt::Debug for dyn Routine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Routine")
            .field("descriptor", &self.descriptor())
            .finish()
    }
}
