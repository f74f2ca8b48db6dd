//! Operation execution layer for castore
//!
//! This crate sits between callers and storage backends:
//! - [`KeyValueStore`]: the public contract, one method per call arity
//! - [`Storage`]: the typed implementation over any [`Backend`]
//! - [`Executor`]: the before/after/exception event envelope
//! - [`EventChannel`] / [`OperationListener`]: prioritized event hooks
//!
//! Backends implement only the [`Backend`] primitives and never see events.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod backend;
mod channel;
mod contract;
mod event;
mod executor;
mod handlers;
mod output;
mod storage;


pub use backend::Backend;
pub use channel::{handler, EventChannel, Handler};
pub use contract::KeyValueStore;
pub use event::{EventName, OperationEvent, OperationListener};
pub use executor::Executor;
pub use handlers::dispatch;
pub use output::Output;
pub use storage::Storage;

pub use castore_core::{
    Argument, CasToken, Error, Operation, OperationArguments, Result, Value,
};
