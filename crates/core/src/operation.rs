//! Storage operation enumeration
//!
//! ## The Nine Operations
//!
//! | Operation | Required | Optional (each requires the previous) |
//! |-----------|----------|---------------------------------------|
//! | has | key | - |
//! | get | key | casToken |
//! | getMulti | keys | casTokens |
//! | add | key, value | expiry |
//! | set | key, value | expiry, casToken |
//! | cas | casToken, key, value | expiry |
//! | delete | key | - |
//! | append | key, value | expiry |
//! | increment | key | offset, initial, expiry |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::arguments::Argument;

/// The storage operations every backend implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Check if a key exists
    Has,
    /// Read a value, optionally issuing a CAS token
    Get,
    /// Read several values, optionally issuing CAS tokens
    GetMulti,
    /// Store a value under a new key
    Add,
    /// Store or replace a value, optionally conditional on a CAS token
    Set,
    /// Store a value only if the CAS token matches
    Cas,
    /// Remove a key
    Delete,
    /// Append a string to an existing string
    Append,
    /// Increment an integer counter
    Increment,
}

impl Operation {
    /// All operations (for iteration)
    pub const ALL: [Operation; 9] = [
        Operation::Has,
        Operation::Get,
        Operation::GetMulti,
        Operation::Add,
        Operation::Set,
        Operation::Cas,
        Operation::Delete,
        Operation::Append,
        Operation::Increment,
    ];

    /// Operation name as used in events and logs
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::Has => "has",
            Operation::Get => "get",
            Operation::GetMulti => "getMulti",
            Operation::Add => "add",
            Operation::Set => "set",
            Operation::Cas => "cas",
            Operation::Delete => "delete",
            Operation::Append => "append",
            Operation::Increment => "increment",
        }
    }

    /// Parse from operation name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// Arguments that must be supplied
    pub const fn required_arguments(&self) -> &'static [Argument] {
        match self {
            Operation::Has | Operation::Get | Operation::Delete | Operation::Increment => {
                &[Argument::Key]
            }
            Operation::GetMulti => &[Argument::Keys],
            Operation::Add | Operation::Set | Operation::Append => {
                &[Argument::Key, Argument::Value]
            }
            Operation::Cas => &[Argument::CasToken, Argument::Key, Argument::Value],
        }
    }

    /// Optional arguments in positional order
    ///
    /// An optional argument only reaches the backend when every argument
    /// before it in this list was supplied too.
    pub const fn optional_arguments(&self) -> &'static [Argument] {
        match self {
            Operation::Has | Operation::Delete => &[],
            Operation::Get => &[Argument::CasToken],
            Operation::GetMulti => &[Argument::CasTokens],
            Operation::Add | Operation::Cas | Operation::Append => &[Argument::Expiry],
            Operation::Set => &[Argument::Expiry, Argument::CasToken],
            Operation::Increment => &[Argument::Offset, Argument::Initial, Argument::Expiry],
        }
    }

    /// Check if this operation writes to the store
    pub const fn is_write(&self) -> bool {
        !matches!(self, Operation::Has | Operation::Get | Operation::GetMulti)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
