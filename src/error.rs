//! Error types and result aliases for the calltrace library.
//!
//! This module defines the core error type [`CalltraceError`] and the [`Result`] type alias
//! used throughout the library. All public APIs that can fail return `Result<T>` for
//! consistent error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalltraceError {
    #[error("cannot rebind sealed member: {0}")]
    SealedMember(String),

    #[error("unknown member: {0}")]
    UnknownMember(String),

    #[error("key error: {0}")]
    KeyError(String),

    #[error("index {index} out of range for length {len}")]
    IndexError { index: usize, len: usize },

    #[error("argument error: {0}")]
    ArgumentError(String),

    #[error("type error: {0}")]
    TypeError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalltraceError>;
