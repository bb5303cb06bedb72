//! Instances of registry-backed types
//!
//! An instance pairs a shared type descriptor with its own state. Calls are
//! dispatched by member name through the type's registry; the instance's UUID
//! is stamped on every call context so trace events for one instance share a
//! correlation id.

use crate::error::{CalltraceError, Result};
use crate::routine::{CallContext, Routine, RoutineKind};
use crate::types::descriptor::TypeDescriptor;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// An instance of a registry-backed type
#[derive(Debug)]
pub struct Instance {
    ty: Arc<TypeDescriptor>,
    id: Uuid,
    state: Mutex<Value>,
}

impl Instance {
    /// Construct an instance of a type
    ///
    /// Runs the registry's construction hook with `Value::Null` state; the
    /// returned value becomes the instance's initial state. If the hook is
    /// wrapped, construction itself is traced.
    pub fn new(ty: &Arc<TypeDescriptor>, args: &[Value]) -> Result<Self> {
        let constructor = ty
            .registry()
            .iter()
            .find(|(_, r)| r.descriptor().kind == RoutineKind::Constructor)
            .map(|(_, r)| Arc::clone(r))
            .ok_or_else(|| {
                CalltraceError::UnknownMember(format!("{}.new (no construction hook)", ty.name()))
            })?;

        let id = Uuid::new_v4();
        let ctx = CallContext::with_correlation_id(id.to_string());
        let mut state = Value::Null;
        let initial = constructor.invoke(&ctx, &mut state, args)?;

        Ok(Self {
            ty: Arc::clone(ty),
            id,
            state: Mutex::new(initial),
        })
    }

    /// The instance's unique id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The name of the instance's type
    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// The instance's type descriptor
    pub fn type_descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.ty
    }

    /// Invoke a routine member by name
    ///
    /// Dispatches through the type's registry; whatever the routine returns or
    /// raises is passed through unchanged.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let routine = self
            .ty
            .routine(name)
            .ok_or_else(|| CalltraceError::UnknownMember(name.to_string()))?;

        debug!(member = name, instance = %self.id, "dispatching member call");

        let ctx = CallContext::with_correlation_id(self.id.to_string());
        let mut state = self.state.lock().unwrap();
        routine.invoke(&ctx, &mut state, args)
    }

    /// Snapshot the instance's current state
    pub fn state(&self) -> Value {
        self.state.lock().unwrap().clone()
    }
}
