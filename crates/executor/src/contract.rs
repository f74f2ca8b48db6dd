//! Public storage contract.
//!
//! Optional arguments are expressed as one method per call arity. Each
//! method supplies exactly the arguments in its signature, so
//! `set(key, value)` never supplies `expiry` even though the backend default
//! is 0.
//!
//! | Operation | Arities |
//! |-----------|---------|
//! | has | `has` |
//! | get | `get`, `get_with_cas` |
//! | getMulti | `get_multi`, `get_multi_with_cas` |
//! | add | `add`, `add_with_expiry` |
//! | set | `set`, `set_with_expiry`, `set_with_cas` |
//! | cas | `cas`, `cas_with_expiry` |
//! | delete | `delete` |
//! | append | `append`, `append_with_expiry` |
//! | increment | `increment`, `increment_by`, `increment_with_initial`, `increment_with_expiry` |
//!
//! ## Expiry
//!
//! Zero or negative means never. Values up to the backend's relative limit
//! (30 days by default) are seconds from now; larger values are absolute
//! Unix timestamps.

use std::collections::BTreeMap;

use castore_core::{CasToken, Result, Value};

/// Key-value storage with check-and-set concurrency control
pub trait KeyValueStore {
    /// Check if a key exists.
    fn has(&self, key: &str) -> Result<bool>;

    /// Get a value. Returns `None` if the key is absent or expired.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Get a value and the CAS token for its current state.
    ///
    /// The slot's incoming value is passed to the backend as the supplied
    /// token; on return it holds the issued token. When the key is absent or
    /// expired the slot is reset to `None`, so a token left over from an
    /// earlier read never survives a miss.
    fn get_with_cas(&self, key: &str, cas_token: &mut Option<CasToken>) -> Result<Option<Value>>;

    /// Get several values. Absent keys are omitted from the result.
    fn get_multi(&self, keys: &[&str]) -> Result<BTreeMap<String, Value>>;

    /// Get several values and one CAS token per returned key.
    fn get_multi_with_cas(
        &self,
        keys: &[&str],
        cas_tokens: &mut BTreeMap<String, CasToken>,
    ) -> Result<BTreeMap<String, Value>>;

    /// Store a value under a new key. Returns false if the key exists.
    fn add(&self, key: &str, value: Value) -> Result<bool>;

    /// [`KeyValueStore::add`] with an expiry.
    fn add_with_expiry(&self, key: &str, value: Value, expiry: i64) -> Result<bool>;

    /// Store or replace a value.
    fn set(&self, key: &str, value: Value) -> Result<bool>;

    /// [`KeyValueStore::set`] with an expiry.
    fn set_with_expiry(&self, key: &str, value: Value, expiry: i64) -> Result<bool>;

    /// [`KeyValueStore::set`] with an expiry and a CAS token.
    ///
    /// A `Some` token turns the write into a check-and-set; `None` is a
    /// plain write.
    fn set_with_cas(
        &self,
        key: &str,
        value: Value,
        expiry: i64,
        cas_token: Option<&CasToken>,
    ) -> Result<bool>;

    /// Store a value only if `token` matches the key's current token.
    ///
    /// A missing key and a stale token both return false.
    fn cas(&self, token: &CasToken, key: &str, value: Value) -> Result<bool>;

    /// [`KeyValueStore::cas`] with an expiry.
    fn cas_with_expiry(&self, token: &CasToken, key: &str, value: Value, expiry: i64)
        -> Result<bool>;

    /// Delete a key. Returns false if the key was absent.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Append a string to the stored string, creating the key if absent.
    fn append(&self, key: &str, value: &str) -> Result<bool>;

    /// [`KeyValueStore::append`] with an expiry.
    fn append_with_expiry(&self, key: &str, value: &str, expiry: i64) -> Result<bool>;

    /// Increment a counter by the backend default offset (1).
    fn increment(&self, key: &str) -> Result<i64>;

    /// Increment a counter by `offset`.
    fn increment_by(&self, key: &str, offset: i64) -> Result<i64>;

    /// Increment a counter by `offset`, creating it with `initial` if absent.
    fn increment_with_initial(&self, key: &str, offset: i64, initial: i64) -> Result<i64>;

    /// [`KeyValueStore::increment_with_initial`] with an expiry.
    fn increment_with_expiry(
        &self,
        key: &str,
        offset: i64,
        initial: i64,
        expiry: i64,
    ) -> Result<i64>;
}
