//! Error types for scorm-runtime.
//!
//! These cover the host side only. The SCORM contract itself never reports
//! errors: `GetLastError` is always zero and failed lifecycle calls are a
//! bare `false`.

use thiserror::Error;

/// Main error type for scorm-runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Method name is not one of the seven SCORM 1.2 API names.
    #[error("unknown API method: {0}")]
    UnknownMethod(String),

    /// Wrong number of arguments for a method.
    #[error("{method} expects {expected} argument(s), got {got}")]
    Arity {
        method: &'static str,
        expected: usize,
        got: usize,
    },

    /// Argument has the wrong kind (e.g. an element name that is not text).
    #[error("{method}: argument {index} must be {expected}")]
    ArgumentType {
        method: &'static str,
        index: usize,
        expected: &'static str,
    },

    /// Terminate's guard refers to a variable that is never bound.
    #[error("reference error: {0} is not defined")]
    UnboundReference(&'static str),

    /// Call script could not be parsed.
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },

    /// Value is not a scalar the data model can hold.
    #[error("invalid data model value: {0}")]
    InvalidValue(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type for scorm-runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
