//! Storage backends for castore
//!
//! This crate implements the reference backend with:
//! - MemoryBackend: FxHashMap-based store with lazy expiry
//! - Clock: wall clock and manual clock for expiry decisions
//! - ExpiryPolicy / MemoryConfig: relative vs absolute expiry, TOML loading
//! - CAS token derivation over (key, value)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod memory;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ExpiryPolicy, MemoryConfig, DEFAULT_RELATIVE_EXPIRY_LIMIT_SECS};
pub use memory::MemoryBackend;
