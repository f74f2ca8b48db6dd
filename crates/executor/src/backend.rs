//! Backend contract: the internal primitives.
//!
//! A backend implements one primitive per operation and never sees events or
//! argument validation. Primitives are reached only through the executor.
//!
//! ## Optional arguments
//!
//! Optional parameters are `Option`s where `None` means "not supplied by the
//! caller". The backend applies its own default in that case (expiry 0,
//! offset 1, initial 0). The dispatcher only passes an optional argument when
//! every optional argument before it was supplied as well.
//!
//! ## CAS token slots
//!
//! `get_internal` and `get_multi_internal` receive an output slot only when
//! the caller asked for tokens. The backend writes the issued token(s) into
//! the slot.

use std::collections::BTreeMap;

use castore_core::{CasToken, Result, Value};

/// Storage backend primitives
pub trait Backend: Send {
    /// Backend name for logs and errors
    fn name(&self) -> &'static str;

    /// Check if a key exists.
    fn has_internal(&mut self, key: &str) -> Result<bool>;

    /// Get a value, issuing a CAS token into `cas_token` when a slot is given.
    fn get_internal(
        &mut self,
        key: &str,
        cas_token: Option<&mut Option<CasToken>>,
    ) -> Result<Option<Value>>;

    /// Get several values. Keys that are not found are omitted.
    ///
    /// When a slot is given it is cleared and filled with one token per
    /// returned key.
    fn get_multi_internal(
        &mut self,
        keys: &[String],
        cas_tokens: Option<&mut BTreeMap<String, CasToken>>,
    ) -> Result<BTreeMap<String, Value>>;

    /// Store a value under a new key. Returns false if the key is live.
    fn add_internal(&mut self, key: &str, value: Value, expiry: Option<i64>) -> Result<bool>;

    /// Store or replace a value.
    ///
    /// With a CAS token this is a conditional write, see [`Backend::cas_internal`].
    fn set_internal(
        &mut self,
        key: &str,
        value: Value,
        expiry: Option<i64>,
        cas_token: Option<&CasToken>,
    ) -> Result<bool>;

    /// Store a value only if `token` equals the last token issued for `key`.
    ///
    /// Returns false on mismatch, including when the key is absent or the
    /// token is `None`.
    fn cas_internal(
        &mut self,
        token: Option<&CasToken>,
        key: &str,
        value: Value,
        expiry: Option<i64>,
    ) -> Result<bool>;

    /// Delete a key. Returns false if the key is absent.
    fn delete_internal(&mut self, key: &str) -> Result<bool>;

    /// Append to an existing string, or create it.
    ///
    /// Fails with `TypeMismatch` if the stored value is not a string.
    fn append_internal(&mut self, key: &str, value: &str, expiry: Option<i64>) -> Result<bool>;

    /// Increment an integer, creating it with `initial` if absent.
    ///
    /// Fails with `TypeMismatch` if the stored value is not an integer.
    fn increment_internal(
        &mut self,
        key: &str,
        offset: Option<i64>,
        initial: Option<i64>,
        expiry: Option<i64>,
    ) -> Result<i64>;
}
