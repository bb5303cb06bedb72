//! Type interception
//!
//! Interception takes a base type descriptor and produces an equivalent
//! descriptor in which every routine member is replaced by a tracing wrapper.
//! It runs once, at type-construction time; instances of the intercepted type
//! share the wrapped registry.

use crate::error::{CalltraceError, Result};
use crate::intercept::traced_routine::TracedRoutine;
use crate::routine::Routine;
use crate::tracer::{CallTracer, TraceSink};
use crate::types::descriptor::{TypeBuilder, TypeDescriptor};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// What to do with a member that cannot be rebound
///
/// The choice is explicit: a sealed member either aborts interception with an
/// error naming it, or is deliberately excluded with the exclusion recorded.
/// There is no silent outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealedMemberPolicy {
    /// Abort interception with [`CalltraceError::SealedMember`]
    Fail,
    /// Keep the member unwrapped; record a skip event and log a warning
    Skip,
}

/// Builder producing an intercepted type from a base type
///
/// Enumerates every routine member of the base registry (inherited entries
/// included) in alphabetical order and replaces each with a
/// [`TracedRoutine`]. Non-callable constants are copied untouched.
///
/// Intercepting an already-intercepted type wraps again: each call then
/// records two events. This is the actual behavior, not deduplicated.
pub struct InterceptBuilder {
    base: Arc<TypeDescriptor>,
    name: Option<String>,
    sink: Option<Arc<dyn TraceSink>>,
    policy: SealedMemberPolicy,
}

impl InterceptBuilder {
    /// Start interception of a base type
    pub fn new(base: Arc<TypeDescriptor>) -> Self {
        Self {
            base,
            name: None,
            sink: None,
            policy: SealedMemberPolicy::Fail,
        }
    }

    /// Name the intercepted type (defaults to the base type's name)
    ///
    /// Trace lines are unaffected: they use the qualified names fixed on the
    /// members' defining types.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the trace sink (defaults to a stdout-echoing [`CallTracer`])
    pub fn sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the sealed-member policy (defaults to [`SealedMemberPolicy::Fail`])
    pub fn sealed_member_policy(mut self, policy: SealedMemberPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Produce the intercepted type
    pub fn build(self) -> Result<Arc<TypeDescriptor>> {
        let sink = self.sink.unwrap_or_else(|| Arc::new(CallTracer::stdout()));
        let name = self.name.unwrap_or_else(|| self.base.name().to_string());

        // One correlation id per interception run, shared by its skip records
        let run_id = Uuid::new_v4().to_string();

        let mut builder = TypeBuilder::new(name);

        for (constant_name, value) in self.base.constants() {
            builder = builder.constant(constant_name, value.clone());
        }

        for (member, routine) in self.base.registry().iter() {
            let descriptor = routine.descriptor();

            if descriptor.sealed {
                match self.policy {
                    SealedMemberPolicy::Fail => {
                        return Err(CalltraceError::SealedMember(descriptor.qualified_name));
                    }
                    SealedMemberPolicy::Skip => {
                        warn!(
                            member = %descriptor.qualified_name,
                            "sealed member left unwrapped"
                        );
                        sink.record_member_skipped(
                            self.base.name(),
                            member,
                            "sealed member disallows rebinding",
                            &run_id,
                        );
                        builder = builder.routine(Arc::clone(routine));
                        continue;
                    }
                }
            }

            builder = builder.routine(TracedRoutine::wrap(Arc::clone(routine), Arc::clone(&sink))?);
        }

        Ok(builder.build())
    }
}

/// Intercept a type with the default policy
///
/// Convenience for [`InterceptBuilder`] with the given sink, the base type's
/// name, and the failing sealed-member policy.
pub fn intercept(base: Arc<TypeDescriptor>, sink: Arc<dyn TraceSink>) -> Result<Arc<TypeDescriptor>> {
    InterceptBuilder::new(base).sink(sink).build()
}
