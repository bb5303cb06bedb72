//! Registry-backed types and their instances
//!
//! Types are described by a [`TypeDescriptor`]: a named method registry plus
//! non-callable constants. The built-in container types (mapping, set,
//! sequence) are the demonstration subjects for interception; each module also
//! provides a `traced_*_type` convenience that returns the intercepted
//! variant.

pub mod descriptor;
pub mod instance;
pub mod mapping;
pub mod sequence;
pub mod set_type;

// Re-export main types
pub use descriptor::{TypeBuilder, TypeDescriptor};
pub use instance::Instance;
pub use mapping::{mapping_type, traced_mapping_type};
pub use sequence::{sequence_type, traced_sequence_type};
pub use set_type::{set_type, traced_set_type};
