//! has, get, getMulti

use std::collections::{BTreeMap, HashMap};

use castore_core::{Argument, OperationArguments, Result, Value};

use super::forwarded;
use crate::{Backend, Output};

/// Forward `has(key)`.
pub fn has<B: Backend + ?Sized>(backend: &mut B, args: &mut OperationArguments) -> Result<Output> {
    Ok(Output::Bool(backend.has_internal(args.key()?)?))
}

/// Forward `get(key[, casToken])`.
///
/// The issued token replaces the supplied one in the arguments.
pub fn get<B: Backend + ?Sized>(backend: &mut B, args: &mut OperationArguments) -> Result<Output> {
    if !forwarded(args).contains(&Argument::CasToken) {
        return Ok(Output::Maybe(backend.get_internal(args.key()?, None)?));
    }

    let mut token = args.cas_token()?;
    let value = backend.get_internal(args.key()?, Some(&mut token))?;
    args.set(Argument::CasToken, token);
    Ok(Output::Maybe(value))
}

/// Forward `getMulti(keys[, casTokens])`.
///
/// The issued tokens replace the supplied ones in the arguments.
pub fn get_multi<B: Backend + ?Sized>(
    backend: &mut B,
    args: &mut OperationArguments,
) -> Result<Output> {
    let keys = args.keys()?;
    if !forwarded(args).contains(&Argument::CasTokens) {
        return Ok(Output::Values(backend.get_multi_internal(&keys, None)?));
    }

    let mut tokens: BTreeMap<_, _> = args.cas_tokens()?;
    let values = backend.get_multi_internal(&keys, Some(&mut tokens))?;
    let issued: HashMap<String, Value> = tokens
        .into_iter()
        .map(|(key, token)| (key, Value::from(token)))
        .collect();
    args.set(Argument::CasTokens, issued);
    Ok(Output::Values(values))
}
