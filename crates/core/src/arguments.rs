//! Argument container for storage operations
//!
//! `OperationArguments` holds the arguments of exactly one operation call.
//! Presence matters more than value: an argument is either not supplied, or
//! supplied (possibly as `Value::Null`). The executor picks the backend
//! primitive overload from which optional arguments are present, never from
//! their values.
//!
//! Named setters validate before storing, so invalid input fails while the
//! arguments are being packed, before any operation event fires:
//!
//! | Setter | Accepts | Error |
//! |--------|---------|-------|
//! | `set_key` | non-empty `String` | InvalidKey |
//! | `set_keys` | `Array` of non-empty `String` | InvalidKey (InvalidArgument if not an array) |
//! | `set_cas_token` | `String` or `Null` | InvalidArgument |
//! | `set_cas_tokens` | `Object`/`Array` of `String` or `Null`, or `Null` | InvalidArgument |
//! | `set_value` | anything (`String` only for append) | InvalidArgument |
//! | `set_expiry`, `set_offset`, `set_initial` | `Int` | InvalidArgument |
//!
//! The raw `set` performs no validation.

use std::collections::BTreeMap;
use std::fmt;

use crate::{CasToken, Error, Operation, Result, Value};

/// Known argument names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Argument {
    /// Single key
    Key,
    /// List of keys (getMulti)
    Keys,
    /// Value to store
    Value,
    /// CAS token, input for cas/set and output for get
    CasToken,
    /// Per-key CAS tokens, output for getMulti
    CasTokens,
    /// Expiry in seconds (relative) or Unix timestamp (absolute)
    Expiry,
    /// Increment step
    Offset,
    /// Initial counter value
    Initial,
}

impl Argument {
    /// All known arguments
    pub const ALL: [Argument; 8] = [
        Argument::Key,
        Argument::Keys,
        Argument::Value,
        Argument::CasToken,
        Argument::CasTokens,
        Argument::Expiry,
        Argument::Offset,
        Argument::Initial,
    ];

    /// Argument name as stored in the container
    pub const fn name(&self) -> &'static str {
        match self {
            Argument::Key => "key",
            Argument::Keys => "keys",
            Argument::Value => "value",
            Argument::CasToken => "casToken",
            Argument::CasTokens => "casTokens",
            Argument::Expiry => "expiry",
            Argument::Offset => "offset",
            Argument::Initial => "initial",
        }
    }

    /// Parse from argument name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|arg| arg.name() == name)
    }
}

impl AsRef<str> for Argument {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments of one operation call
#[derive(Debug, Clone, PartialEq)]
pub struct OperationArguments {
    operation: Operation,
    values: BTreeMap<String, Value>,
}

impl OperationArguments {
    /// Create an empty argument set for `operation`
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            values: BTreeMap::new(),
        }
    }

    /// Create an argument set from name/value pairs.
    ///
    /// Known names go through their validated setter in iteration order;
    /// unknown names are stored raw.
    pub fn with_values<I, K>(operation: Operation, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut args = Self::new(operation);
        for (name, value) in values {
            let name = name.as_ref();
            match Argument::from_name(name) {
                Some(Argument::Key) => args.set_key(value)?,
                Some(Argument::Keys) => args.set_keys(value)?,
                Some(Argument::Value) => args.set_value(value)?,
                Some(Argument::CasToken) => args.set_cas_token(value)?,
                Some(Argument::CasTokens) => args.set_cas_tokens(value)?,
                Some(Argument::Expiry) => args.set_expiry(value)?,
                Some(Argument::Offset) => args.set_offset(value)?,
                Some(Argument::Initial) => args.set_initial(value)?,
                None => args.set(name, value),
            };
        }
        Ok(args)
    }

    /// The operation these arguments belong to
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Check if an argument was supplied (even as `Null`)
    pub fn has(&self, name: impl AsRef<str>) -> bool {
        self.values.contains_key(name.as_ref())
    }

    /// Get a supplied argument
    pub fn get(&self, name: impl AsRef<str>) -> Result<&Value> {
        let name = name.as_ref();
        self.values.get(name).ok_or_else(|| Error::ArgumentNotFound {
            argument: name.to_string(),
        })
    }

    /// Store an argument without validation
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(name.as_ref().to_string(), value.into());
        self
    }

    /// Number of supplied arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no argument was supplied
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over supplied arguments in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    // =========================================================================
    // Validated setters
    // =========================================================================

    /// Set `key`. Used by every operation except getMulti.
    pub fn set_key(&mut self, key: impl Into<Value>) -> Result<&mut Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(self.set(Argument::Key, key))
    }

    /// Set `keys`. Used by getMulti.
    pub fn set_keys(&mut self, keys: impl Into<Value>) -> Result<&mut Self> {
        let keys = keys.into();
        match &keys {
            Value::Array(items) => {
                for key in items {
                    validate_key(key)?;
                }
            }
            other => return Err(self.invalid(Argument::Keys, "Array", other)),
        }
        Ok(self.set(Argument::Keys, keys))
    }

    /// Set `value`. Used by add, set, cas and append.
    ///
    /// Append only accepts strings.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        let value = value.into();
        if self.operation == Operation::Append && !matches!(value, Value::String(_)) {
            return Err(self.invalid(Argument::Value, "String", &value));
        }
        Ok(self.set(Argument::Value, value))
    }

    /// Set `casToken`. Used by get, set and cas.
    pub fn set_cas_token(&mut self, token: impl Into<Value>) -> Result<&mut Self> {
        let token = token.into();
        if !is_token(&token) {
            return Err(self.invalid(Argument::CasToken, "String or Null", &token));
        }
        Ok(self.set(Argument::CasToken, token))
    }

    /// Set `casTokens`. Used by getMulti.
    pub fn set_cas_tokens(&mut self, tokens: impl Into<Value>) -> Result<&mut Self> {
        let tokens = tokens.into();
        let bad = match &tokens {
            Value::Null => None,
            Value::Object(map) => map.values().find(|t| !is_token(t)),
            Value::Array(items) => items.iter().find(|t| !is_token(t)),
            other => Some(other),
        };
        if let Some(bad) = bad {
            return Err(self.invalid(Argument::CasTokens, "String or Null", bad));
        }
        Ok(self.set(Argument::CasTokens, tokens))
    }

    /// Set `expiry`. Used by add, set, cas, append and increment.
    pub fn set_expiry(&mut self, expiry: impl Into<Value>) -> Result<&mut Self> {
        self.set_int(Argument::Expiry, expiry.into())
    }

    /// Set `offset`. Used by increment.
    pub fn set_offset(&mut self, offset: impl Into<Value>) -> Result<&mut Self> {
        self.set_int(Argument::Offset, offset.into())
    }

    /// Set `initial`. Used by increment.
    pub fn set_initial(&mut self, initial: impl Into<Value>) -> Result<&mut Self> {
        self.set_int(Argument::Initial, initial.into())
    }

    fn set_int(&mut self, argument: Argument, value: Value) -> Result<&mut Self> {
        if !matches!(value, Value::Int(_)) {
            return Err(self.invalid(argument, "Int", &value));
        }
        Ok(self.set(argument, value))
    }

    fn invalid(&self, argument: Argument, expected: &str, actual: &Value) -> Error {
        Error::InvalidArgument {
            operation: self.operation.name().to_string(),
            argument: argument.name().to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
        }
    }

    // =========================================================================
    // Typed readers
    // =========================================================================

    /// Read `key`
    pub fn key(&self) -> Result<&str> {
        let value = self.get(Argument::Key)?;
        value
            .as_str()
            .ok_or_else(|| self.invalid(Argument::Key, "String", value))
    }

    /// Read `keys`
    pub fn keys(&self) -> Result<Vec<String>> {
        let value = self.get(Argument::Keys)?;
        let items = value
            .as_array()
            .ok_or_else(|| self.invalid(Argument::Keys, "Array", value))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(Argument::Keys, "String", item))
            })
            .collect()
    }

    /// Read `value`
    pub fn value(&self) -> Result<&Value> {
        self.get(Argument::Value)
    }

    /// Read `casToken`; `None` when supplied as `Null`
    pub fn cas_token(&self) -> Result<Option<CasToken>> {
        match self.get(Argument::CasToken)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(CasToken::new(s.clone()))),
            other => Err(self.invalid(Argument::CasToken, "String or Null", other)),
        }
    }

    /// Read `casTokens` as a key to token map; `Null` entries are skipped
    pub fn cas_tokens(&self) -> Result<BTreeMap<String, CasToken>> {
        match self.get(Argument::CasTokens)? {
            Value::Null | Value::Array(_) => Ok(BTreeMap::new()),
            Value::Object(map) => Ok(map
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|t| (k.clone(), CasToken::new(t))))
                .collect()),
            other => Err(self.invalid(Argument::CasTokens, "Object", other)),
        }
    }

    /// Read `expiry`
    pub fn expiry(&self) -> Result<i64> {
        self.get_int(Argument::Expiry)
    }

    /// Read `offset`
    pub fn offset(&self) -> Result<i64> {
        self.get_int(Argument::Offset)
    }

    /// Read `initial`
    pub fn initial(&self) -> Result<i64> {
        self.get_int(Argument::Initial)
    }

    fn get_int(&self, argument: Argument) -> Result<i64> {
        let value = self.get(argument)?;
        value
            .as_int()
            .ok_or_else(|| self.invalid(argument, "Int", value))
    }
}

fn validate_key(key: &Value) -> Result<()> {
    match key {
        Value::String(s) if !s.is_empty() => Ok(()),
        Value::String(_) => Err(Error::InvalidKey {
            key: String::new(),
            reason: "key must not be empty".to_string(),
        }),
        other => Err(Error::InvalidKey {
            key: format!("{:?}", other),
            reason: format!("key must be a String, {} given", other.type_name()),
        }),
    }
}

fn is_token(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Null)
}
