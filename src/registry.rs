//! Method registries mapping member names to routines
//!
//! A registry is the explicit model of a type's callable members: one entry
//! per routine, keyed by member name, populated once when the type is defined.
//! Inheritance is modeled by copying the base type's entries into the new
//! registry before the type's own members are added.

use crate::error::Result;
use crate::routine::{FnRoutine, Routine, RoutineDescriptor};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of routine members belonging to a type
///
/// Member enumeration order is alphabetical; no other ordering is guaranteed.
#[derive(Default, Clone, Debug)]
pub struct MethodRegistry {
    routines: BTreeMap<String, Arc<dyn Routine>>,
}

impl MethodRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            routines: BTreeMap::new(),
        }
    }

    /// Copy every entry of a base type's registry into this one
    ///
    /// Entries already present keep the base's binding until re-registered,
    /// matching override-by-name semantics.
    pub fn inherit_from(&mut self, base: &MethodRegistry) {
        for (name, routine) in base.routines.iter() {
            self.routines.insert(name.clone(), Arc::clone(routine));
        }
    }

    /// Register a routine under its descriptor name
    ///
    /// Re-registering a name replaces the previous binding.
    pub fn register(&mut self, routine: Arc<dyn Routine>) {
        let name = routine.descriptor().name;
        self.routines.insert(name, routine);
    }

    /// Register a closure-backed routine
    pub fn register_fn<F>(&mut self, descriptor: RoutineDescriptor, func: F)
    where
        F: Fn(&mut Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.register(Arc::new(FnRoutine::new(descriptor, func)));
    }

    /// Look up a routine by member name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Routine>> {
        self.routines.get(name).map(Arc::clone)
    }

    /// Member names in alphabetical order
    pub fn names(&self) -> Vec<String> {
        self.routines.keys().cloned().collect()
    }

    /// Iterate over members in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arc<dyn Routine>)> {
        self.routines.iter()
    }

    /// Get the number of registered routines
    pub fn len(&self) -> usize {
        self.routines.len()
    }

    /// Check if the registry has no routines
    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noop(type_name: &str, name: &str) -> RoutineDescriptor {
        RoutineDescriptor::method(type_name, name)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = MethodRegistry::new();
        registry.register_fn(noop("mapping", "len"), |_state, _args| Ok(json!(0)));

        assert!(registry.get("len").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_alphabetical() {
        let mut registry = MethodRegistry::new();
        for name in ["pop", "get", "keys", "clear"] {
            registry.register_fn(noop("mapping", name), |_state, _args| Ok(Value::Null));
        }

        assert_eq!(registry.names(), vec!["clear", "get", "keys", "pop"]);
    }

    #[test]
    fn test_inherit_from_copies_entries() {
        let mut base = MethodRegistry::new();
        base.register_fn(noop("mapping", "keys"), |_state, _args| Ok(json!(["a"])));
        base.register_fn(noop("mapping", "len"), |_state, _args| Ok(json!(1)));

        let mut derived = MethodRegistry::new();
        derived.inherit_from(&base);

        assert_eq!(derived.len(), 2);
        let inherited = derived.get("keys").unwrap();
        assert_eq!(inherited.descriptor().qualified_name, "mapping.keys");
    }

    #[test]
    fn test_re_register_replaces_binding() {
        let mut registry = MethodRegistry::new();
        registry.register_fn(noop("mapping", "len"), |_state, _args| Ok(json!(1)));
        registry.register_fn(noop("fancy_mapping", "len"), |_state, _args| Ok(json!(2)));

        assert_eq!(registry.len(), 1);
        let bound = registry.get("len").unwrap();
        assert_eq!(bound.descriptor().qualified_name, "fancy_mapping.len");
    }

    #[test]
    fn test_empty_registry() {
        let registry = MethodRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.names().is_empty());
    }
}
