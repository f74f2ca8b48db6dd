//! # castore
//!
//! Key-value storage abstraction with check-and-set (CAS) tokens and
//! operation events.
//!
//! Every call goes through one executor that fires `beforeOperation`, then
//! either `afterOperation` or `onOperationException`, around the backend
//! primitive. Listeners observe every operation without the backend knowing.
//!
//! ## Quick Start
//!
//! ```ignore
//! use castore::prelude::*;
//!
//! let store = StoreBuilder::new().open()?;
//!
//! store.set("user:1", "Alice".into())?;
//!
//! let mut token = None;
//! let name = store.get_with_cas("user:1", &mut token)?;
//! if let Some(token) = token {
//!     store.cas(&token, "user:1", "Bob".into())?;
//! }
//!
//! store.increment_with_initial("visits", 1, 1)?;
//! ```
//!
//! ## Crates
//!
//! - `castore-core` - [`Value`], [`Error`], [`OperationArguments`]
//! - `castore-executor` - [`KeyValueStore`], [`Storage`], events
//! - `castore-storage` - [`MemoryBackend`] and its configuration

#![warn(missing_docs)]

mod builder;

pub mod prelude;

// Re-export main entry points
pub use builder::{memory_store, MemoryStore, StoreBuilder};

// Re-export the layers
pub use castore_core::{
    Argument, CasToken, Error, Operation, OperationArguments, Result, Value,
};
pub use castore_executor::{
    handler, Backend, EventChannel, EventName, Executor, Handler, KeyValueStore,
    OperationEvent, OperationListener, Output, Storage,
};
pub use castore_storage::{
    Clock, ExpiryPolicy, ManualClock, MemoryBackend, MemoryConfig, SystemClock,
};
