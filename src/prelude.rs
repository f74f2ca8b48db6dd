//! Convenient imports for castore.
//!
//! ```ignore
//! use castore::prelude::*;
//!
//! let store = StoreBuilder::new().open()?;
//! store.set("key", "value".into())?;
//! ```

// Entry points
pub use crate::builder::{memory_store, MemoryStore, StoreBuilder};

// Contract
pub use crate::{KeyValueStore, OperationEvent, OperationListener};

// Core types
pub use crate::{CasToken, Error, Result, Value};
