//! Error types for castore
//!
//! ## Error Codes (Canonical)
//!
//! | Code | Raised by | Description |
//! |------|-----------|-------------|
//! | InvalidKey | argument packing | Key (or element of a key list) is empty or not a string |
//! | InvalidArgument | argument packing | Typed argument has the wrong type |
//! | ArgumentNotFound | dispatch | Code asked for an argument that was never supplied |
//! | TypeMismatch | backend | `append`/`increment` against an incompatible stored value |
//! | Overflow | backend | `increment` past the `i64` range |
//! | Backend | backend | Any other backend-defined failure |
//! | Config | configuration | Configuration could not be parsed |
//! | Internal | anywhere | Bug or invariant violation |
//!
//! Validation errors surface before any operation event fires. Everything
//! else passes through `onOperationException` and reaches the caller
//! unchanged, which is why errors are `Clone + PartialEq`.

use thiserror::Error;

/// All castore errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Key is empty or not a string
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// Rendering of the offending key
        key: String,
        /// Reason the key is invalid
        reason: String,
    },

    /// Argument has the wrong type for the operation
    #[error("invalid argument '{argument}' for {operation}: expected {expected}, got {actual}")]
    InvalidArgument {
        /// Operation being packed
        operation: String,
        /// Argument name
        argument: String,
        /// Expected type
        expected: String,
        /// Actual type found
        actual: String,
    },

    /// Argument was never supplied
    #[error("argument '{argument}' does not exist")]
    ArgumentNotFound {
        /// Argument name
        argument: String,
    },

    /// Stored value has the wrong type for the operation
    #[error("{operation}() requires existing value of key {key:?} to be {expected}, {actual} found")]
    TypeMismatch {
        /// Operation name
        operation: String,
        /// Key holding the value
        key: String,
        /// Required type
        expected: String,
        /// Stored type
        actual: String,
    },

    /// Numeric overflow
    #[error("increment of key {key:?} overflows")]
    Overflow {
        /// Key holding the counter
        key: String,
    },

    /// Backend-defined failure
    #[error("{backend} backend error: {message}")]
    Backend {
        /// Backend name
        backend: String,
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("config error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Error message
        reason: String,
    },
}

/// Result type for castore operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidKey { .. } => "InvalidKey",
            Error::InvalidArgument { .. } => "InvalidArgument",
            Error::ArgumentNotFound { .. } => "ArgumentNotFound",
            Error::TypeMismatch { .. } => "TypeMismatch",
            Error::Overflow { .. } => "Overflow",
            Error::Backend { .. } => "Backend",
            Error::Config { .. } => "Config",
            Error::Internal { .. } => "Internal",
        }
    }

    /// Check if this error was raised while packing arguments.
    ///
    /// Validation errors never reach the executor.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidKey { .. } | Error::InvalidArgument { .. })
    }

    /// Check if this is a type mismatch against a stored value.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// Create a backend error.
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Backend {
            backend: backend.into(),
            message: message.into(),
        }
    }
}
