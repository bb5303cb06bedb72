use crate::error::{CalltraceError, Result};
use crate::routine::{CallContext, Routine, RoutineDescriptor};
use crate::tracer::TraceSink;
use serde_json::Value;
use std::sync::Arc;

/// Wraps a routine with a tracing proxy
///
/// The wrapper records one call on the sink, naming the inner routine's
/// qualified name, then delegates with the same arguments and returns (or
/// errors) exactly what the inner routine returns (or errors). The wrapper's
/// descriptor is the inner routine's descriptor, so identity metadata survives
/// wrapping and a wrapped routine can be wrapped again.
pub struct TracedRoutine {
    inner: Arc<dyn Routine>,
    sink: Arc<dyn TraceSink>,
}

impl TracedRoutine {
    /// Wrap a routine, failing for sealed members
    ///
    /// A sealed routine belongs to a type that disallows member replacement;
    /// wrapping one would produce a binding the type cannot accept, so the
    /// error names the member instead.
    pub fn wrap(inner: Arc<dyn Routine>, sink: Arc<dyn TraceSink>) -> Result<Arc<dyn Routine>> {
        let descriptor = inner.descriptor();
        if descriptor.sealed {
            return Err(CalltraceError::SealedMember(descriptor.qualified_name));
        }

        Ok(Arc::new(Self { inner, sink }))
    }
}

impl Routine for TracedRoutine {
    fn invoke(&self, ctx: &CallContext, state: &mut Value, args: &[Value]) -> Result<Value> {
        let descriptor = self.inner.descriptor();
        self.sink
            .record_call(&descriptor.qualified_name, &ctx.correlation_id, args.len());
        self.inner.invoke(ctx, state, args)
    }

    fn descriptor(&self) -> RoutineDescriptor {
        self.inner.descriptor()
    }
}
