//! Storage Comprehensive Test Suite
//!
//! Behaviour every castore storage must show, exercised through the public
//! [`KeyValueStore`] contract over the memory backend.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test storage_comprehensive
//!
//! # Run CAS tests only
//! cargo test --test storage_comprehensive cas_ops::
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub use castore::prelude::*;
pub use castore::{ManualClock, MemoryConfig, Operation};

// Test modules
pub mod atomic_ops;
pub mod basic_ops;
pub mod batch_ops;
pub mod cas_ops;
pub mod expiry;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Fixed starting time for clocked stores
pub const T0: i64 = 1_700_000_000;

/// Send store logs to the test writer
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Create a store on the system clock
pub fn create_store() -> MemoryStore {
    init_tracing();
    StoreBuilder::new().open().expect("Failed to open memory store")
}

/// Create a store on a manual clock, returning a handle to advance it
pub fn create_clocked_store() -> (MemoryStore, ManualClock) {
    init_tracing();
    let clock = ManualClock::new(T0);
    let store = StoreBuilder::new()
        .clock(Arc::new(clock.clone()))
        .open()
        .expect("Failed to open memory store");
    (store, clock)
}

/// Shorthand for a string value
pub fn s(v: &str) -> Value {
    Value::String(v.to_string())
}

/// Counts events by topic
#[derive(Default)]
pub struct CountingListener {
    pub before: AtomicUsize,
    pub after: AtomicUsize,
    pub exception: AtomicUsize,
}

impl CountingListener {
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.before.load(Ordering::SeqCst),
            self.after.load(Ordering::SeqCst),
            self.exception.load(Ordering::SeqCst),
        )
    }
}

impl OperationListener for CountingListener {
    fn before_operation(&self, _event: &OperationEvent<'_>) -> Result<()> {
        self.before.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn after_operation(&self, _event: &OperationEvent<'_>) -> Result<()> {
        self.after.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn on_operation_exception(&self, _event: &OperationEvent<'_>) -> Result<()> {
        self.exception.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Create a store with a counting listener attached
pub fn create_counted_store() -> (MemoryStore, Arc<CountingListener>) {
    let listener = Arc::new(CountingListener::default());
    let store = StoreBuilder::new()
        .listener(listener.clone(), 0)
        .open()
        .expect("Failed to open memory store");
    (store, listener)
}
