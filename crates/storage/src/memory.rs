//! In-memory reference backend
//!
//! Each key maps to its value, its expiration timestamp (0 = never), and the
//! last CAS token issued for it.
//!
//! # Expiry
//!
//! Expired entries are not swept in the background. Any primitive that
//! touches an expired key evicts it first and then behaves as if the key was
//! absent. [`MemoryBackend::purge_expired`] evicts them all at once.
//!
//! # CAS tokens
//!
//! Tokens are issued only by reads that ask for one. Every write clears the
//! stored token, so a token issued before a write can never match after it,
//! and a key that was never read with a token cannot be swapped.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::trace;

use castore_core::{CasToken, Error, Result, Value};
use castore_executor::Backend;

use crate::clock::{Clock, SystemClock};
use crate::config::{ExpiryPolicy, MemoryConfig};
use crate::token;

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: i64,
    cas_token: Option<CasToken>,
}

/// Single-process key-value backend
pub struct MemoryBackend {
    entries: FxHashMap<String, Entry>,
    policy: ExpiryPolicy,
    clock: Arc<dyn Clock>,
}

impl MemoryBackend {
    /// Create an empty backend with default settings and the system clock
    pub fn new() -> Self {
        Self::with_config(&MemoryConfig::default())
    }

    /// Create an empty backend from a config
    pub fn with_config(config: &MemoryConfig) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(
                config.initial_capacity,
                Default::default(),
            ),
            policy: config.policy(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Expiry policy in use
    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .values()
            .filter(|e| ExpiryPolicy::is_live(e.expires_at, now))
            .count()
    }

    /// Check if there are no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict every expired entry. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries
            .retain(|_, e| ExpiryPolicy::is_live(e.expires_at, now));
        let purged = before - self.entries.len();
        if purged > 0 {
            trace!(purged, "purged expired entries");
        }
        purged
    }

    /// Live entry for `key`, evicting it if expired
    fn live(&mut self, key: &str) -> Option<&mut Entry> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            None => return None,
            Some(entry) => !ExpiryPolicy::is_live(entry.expires_at, now),
        };
        if expired {
            self.entries.remove(key);
            trace!(key, "evicted expired entry");
            return None;
        }
        self.entries.get_mut(key)
    }

    fn write(&mut self, key: &str, value: Value, expiry: Option<i64>) {
        let expires_at = self
            .policy
            .expires_at(expiry.unwrap_or(0), self.clock.now());
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at,
                cas_token: None,
            },
        );
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("entries", &self.entries.len())
            .field("policy", &self.policy)
            .finish()
    }
}

fn type_mismatch(operation: &str, key: &str, expected: &str, actual: &Value) -> Error {
    Error::TypeMismatch {
        operation: operation.to_string(),
        key: key.to_string(),
        expected: expected.to_string(),
        actual: actual.type_name().to_string(),
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn has_internal(&mut self, key: &str) -> Result<bool> {
        Ok(self.live(key).is_some())
    }

    fn get_internal(
        &mut self,
        key: &str,
        cas_token: Option<&mut Option<CasToken>>,
    ) -> Result<Option<Value>> {
        let entry = match self.live(key) {
            Some(entry) => entry,
            None => {
                if let Some(slot) = cas_token {
                    *slot = None;
                }
                return Ok(None);
            }
        };
        if let Some(slot) = cas_token {
            let issued = token::derive(key, &entry.value);
            entry.cas_token = Some(issued.clone());
            *slot = Some(issued);
        }
        Ok(Some(entry.value.clone()))
    }

    fn get_multi_internal(
        &mut self,
        keys: &[String],
        mut cas_tokens: Option<&mut BTreeMap<String, CasToken>>,
    ) -> Result<BTreeMap<String, Value>> {
        if let Some(slot) = cas_tokens.as_deref_mut() {
            slot.clear();
        }

        let mut values = BTreeMap::new();
        for key in keys {
            let entry = match self.live(key) {
                Some(entry) => entry,
                None => continue,
            };
            if let Some(slot) = cas_tokens.as_deref_mut() {
                let issued = token::derive(key, &entry.value);
                entry.cas_token = Some(issued.clone());
                slot.insert(key.clone(), issued);
            }
            values.insert(key.clone(), entry.value.clone());
        }
        Ok(values)
    }

    fn add_internal(&mut self, key: &str, value: Value, expiry: Option<i64>) -> Result<bool> {
        if self.live(key).is_some() {
            return Ok(false);
        }
        self.write(key, value, expiry);
        Ok(true)
    }

    fn set_internal(
        &mut self,
        key: &str,
        value: Value,
        expiry: Option<i64>,
        cas_token: Option<&CasToken>,
    ) -> Result<bool> {
        if cas_token.is_some() {
            return self.cas_internal(cas_token, key, value, expiry);
        }
        self.write(key, value, expiry);
        Ok(true)
    }

    fn cas_internal(
        &mut self,
        token: Option<&CasToken>,
        key: &str,
        value: Value,
        expiry: Option<i64>,
    ) -> Result<bool> {
        let token = match token {
            Some(token) => token,
            None => return Ok(false),
        };
        let matches = match self.live(key) {
            Some(entry) => entry.cas_token.as_ref() == Some(token),
            None => false,
        };
        if !matches {
            return Ok(false);
        }
        self.write(key, value, expiry);
        Ok(true)
    }

    fn delete_internal(&mut self, key: &str) -> Result<bool> {
        if self.live(key).is_none() {
            return Ok(false);
        }
        self.entries.remove(key);
        Ok(true)
    }

    fn append_internal(&mut self, key: &str, value: &str, expiry: Option<i64>) -> Result<bool> {
        let appended = match self.live(key) {
            Some(entry) => match &entry.value {
                Value::String(existing) => format!("{}{}", existing, value),
                other => return Err(type_mismatch("append", key, "String", other)),
            },
            None => value.to_string(),
        };
        self.write(key, Value::String(appended), expiry);
        Ok(true)
    }

    fn increment_internal(
        &mut self,
        key: &str,
        offset: Option<i64>,
        initial: Option<i64>,
        expiry: Option<i64>,
    ) -> Result<i64> {
        let offset = offset.unwrap_or(1);
        let counter = match self.live(key) {
            Some(entry) => match &entry.value {
                Value::Int(current) => current.checked_add(offset).ok_or_else(|| Error::Overflow {
                    key: key.to_string(),
                })?,
                other => return Err(type_mismatch("increment", key, "Int", other)),
            },
            None => initial.unwrap_or(0),
        };
        self.write(key, Value::Int(counter), expiry);
        Ok(counter)
    }
}
