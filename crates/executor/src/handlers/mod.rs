//! Argument forwarding to backend primitives.
//!
//! Dispatch checks [`Operation::required_arguments`] before any backend
//! call. Each handler then calls the primitive with the minimal matching
//! overload: an argument from [`Operation::optional_arguments`] is forwarded
//! only when it and every optional argument before it were supplied.

mod read;
mod write;

use castore_core::{Argument, Error, Operation, OperationArguments, Result};

use crate::{Backend, Output};

/// Forward one operation's arguments to the backend.
pub fn dispatch<B: Backend + ?Sized>(
    backend: &mut B,
    args: &mut OperationArguments,
) -> Result<Output> {
    let operation = args.operation();
    if let Some(missing) = operation
        .required_arguments()
        .iter()
        .find(|argument| !args.has(**argument))
    {
        return Err(Error::ArgumentNotFound {
            argument: missing.name().to_string(),
        });
    }

    match operation {
        Operation::Has => read::has(backend, args),
        Operation::Get => read::get(backend, args),
        Operation::GetMulti => read::get_multi(backend, args),
        Operation::Add => write::add(backend, args),
        Operation::Set => write::set(backend, args),
        Operation::Cas => write::cas(backend, args),
        Operation::Delete => write::delete(backend, args),
        Operation::Append => write::append(backend, args),
        Operation::Increment => write::increment(backend, args),
    }
}

/// The leading run of optional arguments that were all supplied.
fn forwarded(args: &OperationArguments) -> &'static [Argument] {
    let optional = args.operation().optional_arguments();
    let supplied = optional
        .iter()
        .take_while(|argument| args.has(**argument))
        .count();
    &optional[..supplied]
}

/// Read an optional argument, `None` unless it is forwarded.
fn supplied<T>(
    args: &OperationArguments,
    argument: Argument,
    read: fn(&OperationArguments) -> Result<T>,
) -> Result<Option<T>> {
    if forwarded(args).contains(&argument) {
        read(args).map(Some)
    } else {
        Ok(None)
    }
}
