//! CAS (check-and-set) tokens
//!
//! A token is an opaque string that identifies the last observed state of a
//! key. Backends decide how tokens are derived; callers only compare them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Value;

/// Opaque check-and-set token
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CasToken(String);

impl CasToken {
    /// Wrap a backend-issued token string
    pub fn new(token: impl Into<String>) -> Self {
        CasToken(token.into())
    }

    /// Token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CasToken {
    fn from(s: String) -> Self {
        CasToken(s)
    }
}

impl From<&str> for CasToken {
    fn from(s: &str) -> Self {
        CasToken(s.to_string())
    }
}

impl From<CasToken> for Value {
    fn from(token: CasToken) -> Self {
        Value::String(token.0)
    }
}

impl From<&CasToken> for Value {
    fn from(token: &CasToken) -> Self {
        Value::String(token.0.clone())
    }
}
