//! Typed storage over a backend.
//!
//! [`Storage`] implements [`KeyValueStore`] for any [`Backend`]. Each method:
//!
//! 1. Packs its parameters into an [`OperationArguments`] (validation errors
//!    surface here, before any event fires)
//! 2. Runs the operation through the [`Executor`]
//! 3. Extracts the typed result and any CAS token written back
//!
//! # Example
//!
//! ```ignore
//! use castore_executor::{KeyValueStore, Storage};
//!
//! let storage = Storage::new(backend);
//! storage.set("key", "hello".into())?;
//! let value = storage.get("key")?;
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;

use castore_core::{CasToken, Operation, OperationArguments, Result, Value};

use crate::handlers::dispatch;
use crate::{Backend, Executor, KeyValueStore, OperationListener, Output};

/// Event-instrumented storage over a backend
pub struct Storage<B: Backend> {
    backend: Mutex<B>,
    executor: Executor,
}

impl<B: Backend> Storage<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Mutex::new(backend),
            executor: Executor::new(),
        }
    }

    /// Attach a listener to all operation events.
    ///
    /// Higher priorities run first. Listeners with equal priority run in
    /// attachment order.
    pub fn add_operation_listener(&self, listener: Arc<dyn OperationListener>, priority: i32) {
        self.executor.add_listener(listener, priority);
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Run a closure with exclusive access to the backend.
    ///
    /// Bypasses the event envelope.
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut *self.backend.lock())
    }

    /// Consume the storage and return the backend.
    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }

    /// Execute a prepared argument set.
    ///
    /// CAS tokens issued by the backend are written back into `arguments`.
    pub fn execute(&self, arguments: &mut OperationArguments) -> Result<Output> {
        self.executor
            .execute(self, arguments, |args| dispatch(&mut *self.backend.lock(), args))
    }

    fn run(&self, mut arguments: OperationArguments) -> Result<Output> {
        self.execute(&mut arguments)
    }
}

impl<B: Backend> std::fmt::Debug for Storage<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("backend", &self.backend.lock().name())
            .field("executor", &self.executor)
            .finish()
    }
}

fn key_list(keys: &[&str]) -> Value {
    Value::Array(keys.iter().map(|k| Value::from(*k)).collect())
}

fn token_map(tokens: &BTreeMap<String, CasToken>) -> Value {
    let map: HashMap<String, Value> = tokens
        .iter()
        .map(|(k, t)| (k.clone(), Value::from(t)))
        .collect();
    Value::Object(map)
}

impl<B: Backend> KeyValueStore for Storage<B> {
    // =========================================================================
    // Reads
    // =========================================================================

    fn has(&self, key: &str) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Has);
        args.set_key(key)?;
        self.run(args)?.into_bool(Operation::Has)
    }

    fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut args = OperationArguments::new(Operation::Get);
        args.set_key(key)?;
        self.run(args)?.into_maybe(Operation::Get)
    }

    fn get_with_cas(&self, key: &str, cas_token: &mut Option<CasToken>) -> Result<Option<Value>> {
        let mut args = OperationArguments::new(Operation::Get);
        args.set_key(key)?.set_cas_token(cas_token.as_ref())?;
        let value = self.execute(&mut args)?.into_maybe(Operation::Get)?;
        *cas_token = args.cas_token()?;
        Ok(value)
    }

    fn get_multi(&self, keys: &[&str]) -> Result<BTreeMap<String, Value>> {
        let mut args = OperationArguments::new(Operation::GetMulti);
        args.set_keys(key_list(keys))?;
        self.run(args)?.into_values(Operation::GetMulti)
    }

    fn get_multi_with_cas(
        &self,
        keys: &[&str],
        cas_tokens: &mut BTreeMap<String, CasToken>,
    ) -> Result<BTreeMap<String, Value>> {
        let mut args = OperationArguments::new(Operation::GetMulti);
        args.set_keys(key_list(keys))?
            .set_cas_tokens(token_map(cas_tokens))?;
        let values = self.execute(&mut args)?.into_values(Operation::GetMulti)?;
        *cas_tokens = args.cas_tokens()?;
        Ok(values)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    fn add(&self, key: &str, value: Value) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Add);
        args.set_key(key)?.set_value(value)?;
        self.run(args)?.into_bool(Operation::Add)
    }

    fn add_with_expiry(&self, key: &str, value: Value, expiry: i64) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Add);
        args.set_key(key)?.set_value(value)?.set_expiry(expiry)?;
        self.run(args)?.into_bool(Operation::Add)
    }

    fn set(&self, key: &str, value: Value) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Set);
        args.set_key(key)?.set_value(value)?;
        self.run(args)?.into_bool(Operation::Set)
    }

    fn set_with_expiry(&self, key: &str, value: Value, expiry: i64) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Set);
        args.set_key(key)?.set_value(value)?.set_expiry(expiry)?;
        self.run(args)?.into_bool(Operation::Set)
    }

    fn set_with_cas(
        &self,
        key: &str,
        value: Value,
        expiry: i64,
        cas_token: Option<&CasToken>,
    ) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Set);
        args.set_key(key)?
            .set_value(value)?
            .set_expiry(expiry)?
            .set_cas_token(cas_token)?;
        self.run(args)?.into_bool(Operation::Set)
    }

    fn cas(&self, token: &CasToken, key: &str, value: Value) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Cas);
        args.set_cas_token(token)?.set_key(key)?.set_value(value)?;
        self.run(args)?.into_bool(Operation::Cas)
    }

    fn cas_with_expiry(
        &self,
        token: &CasToken,
        key: &str,
        value: Value,
        expiry: i64,
    ) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Cas);
        args.set_cas_token(token)?
            .set_key(key)?
            .set_value(value)?
            .set_expiry(expiry)?;
        self.run(args)?.into_bool(Operation::Cas)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Delete);
        args.set_key(key)?;
        self.run(args)?.into_bool(Operation::Delete)
    }

    fn append(&self, key: &str, value: &str) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Append);
        args.set_key(key)?.set_value(value)?;
        self.run(args)?.into_bool(Operation::Append)
    }

    fn append_with_expiry(&self, key: &str, value: &str, expiry: i64) -> Result<bool> {
        let mut args = OperationArguments::new(Operation::Append);
        args.set_key(key)?.set_value(value)?.set_expiry(expiry)?;
        self.run(args)?.into_bool(Operation::Append)
    }

    // =========================================================================
    // Counters
    // =========================================================================

    fn increment(&self, key: &str) -> Result<i64> {
        let mut args = OperationArguments::new(Operation::Increment);
        args.set_key(key)?;
        self.run(args)?.into_int(Operation::Increment)
    }

    fn increment_by(&self, key: &str, offset: i64) -> Result<i64> {
        let mut args = OperationArguments::new(Operation::Increment);
        args.set_key(key)?.set_offset(offset)?;
        self.run(args)?.into_int(Operation::Increment)
    }

    fn increment_with_initial(&self, key: &str, offset: i64, initial: i64) -> Result<i64> {
        let mut args = OperationArguments::new(Operation::Increment);
        args.set_key(key)?.set_offset(offset)?.set_initial(initial)?;
        self.run(args)?.into_int(Operation::Increment)
    }

    fn increment_with_expiry(
        &self,
        key: &str,
        offset: i64,
        initial: i64,
        expiry: i64,
    ) -> Result<i64> {
        let mut args = OperationArguments::new(Operation::Increment);
        args.set_key(key)?
            .set_offset(offset)?
            .set_initial(initial)?
            .set_expiry(expiry)?;
        self.run(args)?.into_int(Operation::Increment)
    }
}
