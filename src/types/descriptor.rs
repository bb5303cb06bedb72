//! Type descriptors and the builder that assembles them
//!
//! A type descriptor is the class-descriptor analog: a named registry of
//! routine members plus non-callable class-level constants. Descriptors are
//! assembled once, at type-definition time, and shared immutably afterwards.

use crate::error::Result;
use crate::registry::MethodRegistry;
use crate::routine::{FnRoutine, Routine, RoutineDescriptor};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A named set of routine members and constants
#[derive(Debug)]
pub struct TypeDescriptor {
    name: String,
    registry: MethodRegistry,
    constants: BTreeMap<String, Value>,
}

impl TypeDescriptor {
    /// Get the type's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the type's method registry
    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Look up a routine member by name
    pub fn routine(&self, name: &str) -> Option<Arc<dyn Routine>> {
        self.registry.get(name)
    }

    /// Routine member names in alphabetical order
    pub fn routine_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Look up a non-callable constant by name
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    /// The type's non-callable constants
    pub fn constants(&self) -> &BTreeMap<String, Value> {
        &self.constants
    }
}

/// Builder assembling a [`TypeDescriptor`]
///
/// Routines registered through the builder get their qualified name minted
/// from the type under construction; routines copied in via [`base`] keep the
/// qualified name of their defining type, so an inherited member still traces
/// under the base type's name.
///
/// [`base`]: TypeBuilder::base
pub struct TypeBuilder {
    name: String,
    registry: MethodRegistry,
    constants: BTreeMap<String, Value>,
}

impl TypeBuilder {
    /// Start a builder for a new type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: MethodRegistry::new(),
            constants: BTreeMap::new(),
        }
    }

    /// Copy the base type's registry and constants into the new type
    pub fn base(mut self, base: &TypeDescriptor) -> Self {
        self.registry.inherit_from(&base.registry);
        for (name, value) in base.constants.iter() {
            self.constants.insert(name.clone(), value.clone());
        }
        self
    }

    /// Register a routine under its descriptor name
    pub fn routine(mut self, routine: Arc<dyn Routine>) -> Self {
        self.registry.register(routine);
        self
    }

    /// Register an ordinary method backed by a closure
    pub fn method<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&mut Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let descriptor = RoutineDescriptor::method(&self.name, name);
        self.registry.register(Arc::new(FnRoutine::new(descriptor, func)));
        self
    }

    /// Register a construction hook backed by a closure
    pub fn constructor<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&mut Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let descriptor = RoutineDescriptor::constructor(&self.name, name);
        self.registry.register(Arc::new(FnRoutine::new(descriptor, func)));
        self
    }

    /// Register a construction hook that disallows rebinding
    pub fn sealed_constructor<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&mut Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let descriptor = RoutineDescriptor::constructor(&self.name, name).sealed();
        self.registry.register(Arc::new(FnRoutine::new(descriptor, func)));
        self
    }

    /// Register a non-callable class-level constant
    pub fn constant(mut self, name: &str, value: Value) -> Self {
        self.constants.insert(name.to_string(), value);
        self
    }

    /// Finish the type
    pub fn build(self) -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor {
            name: self.name,
            registry: self.registry,
            constants: self.constants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routine::RoutineKind;
    use crate::types::instance::Instance;
    use serde_json::json;

    fn point_type() -> Arc<TypeDescriptor> {
        TypeBuilder::new("point")
            .constructor("new", |_state, args| {
                let x = args.first().cloned().unwrap_or(json!(0));
                let y = args.get(1).cloned().unwrap_or(json!(0));
                Ok(json!({ "x": x, "y": y }))
            })
            .method("x", |state, _args| Ok(state["x"].clone()))
            .method("y", |state, _args| Ok(state["y"].clone()))
            .constant("dimensions", json!(2))
            .build()
    }

    #[test]
    fn test_builder_assembles_registry() {
        let ty = point_type();

        assert_eq!(ty.name(), "point");
        assert_eq!(ty.routine_names(), vec!["new", "x", "y"]);
        assert_eq!(ty.constant("dimensions"), Some(&json!(2)));
    }

    #[test]
    fn test_qualified_names_minted_from_type() {
        let ty = point_type();
        let routine = ty.routine("x").unwrap();
        assert_eq!(routine.descriptor().qualified_name, "point.x");
    }

    #[test]
    fn test_construct_runs_constructor() {
        let ty = point_type();
        let instance = Instance::new(&ty, &[json!(3), json!(4)]).unwrap();

        assert_eq!(instance.call("x", &[]).unwrap(), json!(3));
        assert_eq!(instance.call("y", &[]).unwrap(), json!(4));
    }

    #[test]
    fn test_base_copies_members_and_constants() {
        let base = point_type();
        let derived = TypeBuilder::new("point3d")
            .base(&base)
            .method("z", |state, _args| {
                Ok(state.get("z").cloned().unwrap_or(json!(0)))
            })
            .build();

        // Inherited members keep the defining type's qualified name
        let inherited = derived.routine("x").unwrap();
        assert_eq!(inherited.descriptor().qualified_name, "point.x");

        // Own members are qualified under the new type
        let own = derived.routine("z").unwrap();
        assert_eq!(own.descriptor().qualified_name, "point3d.z");

        assert_eq!(derived.constant("dimensions"), Some(&json!(2)));
    }

    #[test]
    fn test_sealed_constructor_descriptor() {
        let ty = TypeBuilder::new("frozen")
            .sealed_constructor("new", |_state, _args| Ok(json!([])))
            .build();

        let ctor = ty.routine("new").unwrap();
        assert!(ctor.descriptor().sealed);
        assert_eq!(ctor.descriptor().kind, RoutineKind::Constructor);
    }
}
