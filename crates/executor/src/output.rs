//! Operation results.

use std::collections::BTreeMap;

use castore_core::{Error, Operation, Result, Value};

/// Result of one storage operation.
///
/// This is the value carried by the `afterOperation` event.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// has, add, set, cas, delete, append
    Bool(bool),
    /// get; `None` when the key is absent
    Maybe(Option<Value>),
    /// getMulti; absent keys are omitted
    Values(BTreeMap<String, Value>),
    /// increment
    Int(i64),
}

impl Output {
    /// Extract a boolean result.
    pub fn into_bool(self, operation: Operation) -> Result<bool> {
        match self {
            Output::Bool(b) => Ok(b),
            other => Err(unexpected(operation, &other)),
        }
    }

    /// Extract a single optional value.
    pub fn into_maybe(self, operation: Operation) -> Result<Option<Value>> {
        match self {
            Output::Maybe(v) => Ok(v),
            other => Err(unexpected(operation, &other)),
        }
    }

    /// Extract a key to value map.
    pub fn into_values(self, operation: Operation) -> Result<BTreeMap<String, Value>> {
        match self {
            Output::Values(v) => Ok(v),
            other => Err(unexpected(operation, &other)),
        }
    }

    /// Extract an integer result.
    pub fn into_int(self, operation: Operation) -> Result<i64> {
        match self {
            Output::Int(i) => Ok(i),
            other => Err(unexpected(operation, &other)),
        }
    }
}

fn unexpected(operation: Operation, output: &Output) -> Error {
    Error::Internal {
        reason: format!("Unexpected output for {}: {:?}", operation, output),
    }
}
