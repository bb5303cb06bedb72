//! The method-interception facility
//!
//! Given a type described by its method registry, produce an equivalent type
//! in which every routine member is replaced by a tracing proxy that records
//! a debug trace before delegating to the original implementation.
//!
//! - [`TracedRoutine`] wraps a single routine transparently
//! - [`InterceptBuilder`] intercepts a whole type, with an explicit
//!   [`SealedMemberPolicy`] for members that cannot be rebound
//! - [`intercept`] is the one-call convenience with default policy

pub mod builder;
pub mod traced_routine;

// Re-export main types
pub use builder::{intercept, InterceptBuilder, SealedMemberPolicy};
pub use traced_routine::TracedRoutine;
