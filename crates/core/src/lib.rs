//! Core types for castore
//!
//! This crate defines the types shared by every layer:
//! - [`Value`]: the stored value model
//! - [`Error`] / [`Result`]: the error taxonomy
//! - [`Operation`]: the nine storage operations
//! - [`OperationArguments`]: the validated per-call argument container
//! - [`CasToken`]: opaque check-and-set token

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arguments;
pub mod cas;
pub mod error;
pub mod operation;
pub mod value;

pub use arguments::{Argument, OperationArguments};
pub use cas::CasToken;
pub use error::{Error, Result};
pub use operation::Operation;
pub use value::Value;
