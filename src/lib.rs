pub mod error;
pub mod intercept;
pub mod registry;
pub mod routine;
pub mod tracer;
pub mod types;

pub use error::{CalltraceError, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{CalltraceError, Result};
    pub use crate::intercept::{intercept, InterceptBuilder, SealedMemberPolicy, TracedRoutine};
    pub use crate::registry::MethodRegistry;
    pub use crate::routine::{CallContext, FnRoutine, Routine, RoutineDescriptor, RoutineKind};
    pub use crate::tracer::{CallTracer, NullTracer, TraceSink};
    pub use crate::types::{
        mapping_type, sequence_type, set_type, traced_mapping_type, traced_sequence_type,
        traced_set_type, Instance, TypeBuilder, TypeDescriptor,
    };
}
