//! add, set, cas, delete, append, increment

use castore_core::{Argument, Error, OperationArguments, Result};

use super::supplied;
use crate::{Backend, Output};

/// Forward `add(key, value[, expiry])`.
pub fn add<B: Backend + ?Sized>(backend: &mut B, args: &mut OperationArguments) -> Result<Output> {
    let expiry = supplied(args, Argument::Expiry, OperationArguments::expiry)?;
    let added = backend.add_internal(args.key()?, args.value()?.clone(), expiry)?;
    Ok(Output::Bool(added))
}

/// Forward `set(key, value[, expiry[, casToken]])`.
pub fn set<B: Backend + ?Sized>(backend: &mut B, args: &mut OperationArguments) -> Result<Output> {
    let expiry = supplied(args, Argument::Expiry, OperationArguments::expiry)?;
    let token = supplied(args, Argument::CasToken, OperationArguments::cas_token)?.flatten();
    let stored = backend.set_internal(args.key()?, args.value()?.clone(), expiry, token.as_ref())?;
    Ok(Output::Bool(stored))
}

/// Forward `cas(casToken, key, value[, expiry])`.
pub fn cas<B: Backend + ?Sized>(backend: &mut B, args: &mut OperationArguments) -> Result<Output> {
    let token = args.cas_token()?;
    let expiry = supplied(args, Argument::Expiry, OperationArguments::expiry)?;
    let swapped = backend.cas_internal(
        token.as_ref(),
        args.key()?,
        args.value()?.clone(),
        expiry,
    )?;
    Ok(Output::Bool(swapped))
}

/// Forward `delete(key)`.
pub fn delete<B: Backend + ?Sized>(
    backend: &mut B,
    args: &mut OperationArguments,
) -> Result<Output> {
    Ok(Output::Bool(backend.delete_internal(args.key()?)?))
}

/// Forward `append(key, value[, expiry])`.
pub fn append<B: Backend + ?Sized>(
    backend: &mut B,
    args: &mut OperationArguments,
) -> Result<Output> {
    let expiry = supplied(args, Argument::Expiry, OperationArguments::expiry)?;
    let value = args.value()?;
    let tail = value.as_str().ok_or_else(|| Error::InvalidArgument {
        operation: args.operation().name().to_string(),
        argument: Argument::Value.name().to_string(),
        expected: "String".to_string(),
        actual: value.type_name().to_string(),
    })?;
    Ok(Output::Bool(backend.append_internal(args.key()?, tail, expiry)?))
}

/// Forward `increment(key[, offset[, initial[, expiry]]])`.
pub fn increment<B: Backend + ?Sized>(
    backend: &mut B,
    args: &mut OperationArguments,
) -> Result<Output> {
    let offset = supplied(args, Argument::Offset, OperationArguments::offset)?;
    let initial = supplied(args, Argument::Initial, OperationArguments::initial)?;
    let expiry = supplied(args, Argument::Expiry, OperationArguments::expiry)?;
    let value = backend.increment_internal(args.key()?, offset, initial, expiry)?;
    Ok(Output::Int(value))
}
