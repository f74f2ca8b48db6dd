//! Operation events and listeners.
//!
//! Every operation that passes argument validation produces exactly one
//! `beforeOperation` event followed by either one `afterOperation` event
//! (carrying the result) or one `onOperationException` event (carrying the
//! error). Events borrow everything they expose and live only for the
//! duration of the trigger call.

use std::fmt;

use castore_core::{Error, Operation, OperationArguments, Result};

use crate::{KeyValueStore, Output};

/// Event topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Fired before the backend primitive runs
    BeforeOperation,
    /// Fired after the backend primitive succeeded
    AfterOperation,
    /// Fired after the backend primitive failed
    OnOperationException,
}

impl EventName {
    /// All topics
    pub const ALL: [EventName; 3] = [
        EventName::BeforeOperation,
        EventName::AfterOperation,
        EventName::OnOperationException,
    ];

    /// Topic name
    pub const fn name(&self) -> &'static str {
        match self {
            EventName::BeforeOperation => "beforeOperation",
            EventName::AfterOperation => "afterOperation",
            EventName::OnOperationException => "onOperationException",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lifecycle moment of one operation
pub struct OperationEvent<'a> {
    name: EventName,
    target: &'a dyn KeyValueStore,
    operation: Operation,
    arguments: &'a OperationArguments,
    return_value: Option<&'a Output>,
    error: Option<&'a Error>,
}

impl<'a> OperationEvent<'a> {
    /// `beforeOperation` event
    pub fn before(
        target: &'a dyn KeyValueStore,
        operation: Operation,
        arguments: &'a OperationArguments,
    ) -> Self {
        Self {
            name: EventName::BeforeOperation,
            target,
            operation,
            arguments,
            return_value: None,
            error: None,
        }
    }

    /// `afterOperation` event
    pub fn after(
        target: &'a dyn KeyValueStore,
        operation: Operation,
        arguments: &'a OperationArguments,
        return_value: &'a Output,
    ) -> Self {
        Self {
            name: EventName::AfterOperation,
            target,
            operation,
            arguments,
            return_value: Some(return_value),
            error: None,
        }
    }

    /// `onOperationException` event
    pub fn exception(
        target: &'a dyn KeyValueStore,
        operation: Operation,
        arguments: &'a OperationArguments,
        error: &'a Error,
    ) -> Self {
        Self {
            name: EventName::OnOperationException,
            target,
            operation,
            arguments,
            return_value: None,
            error: Some(error),
        }
    }

    /// Event topic
    pub fn name(&self) -> EventName {
        self.name
    }

    /// Storage the operation runs against
    pub fn target(&self) -> &'a dyn KeyValueStore {
        self.target
    }

    /// Operation being performed
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Arguments of the call
    pub fn arguments(&self) -> &'a OperationArguments {
        self.arguments
    }

    /// Operation result, present on `afterOperation`
    pub fn return_value(&self) -> Option<&'a Output> {
        self.return_value
    }

    /// Operation error, present on `onOperationException`
    pub fn error(&self) -> Option<&'a Error> {
        self.error
    }
}

impl fmt::Debug for OperationEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationEvent")
            .field("name", &self.name)
            .field("operation", &self.operation)
            .field("arguments", &self.arguments)
            .field("return_value", &self.return_value)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Listener for all three operation events.
///
/// A listener returning an error aborts the current call: the error reaches
/// the caller as is and `onOperationException` is not fired for it.
pub trait OperationListener: Send + Sync {
    /// Handle `beforeOperation`.
    fn before_operation(&self, _event: &OperationEvent<'_>) -> Result<()> {
        Ok(())
    }

    /// Handle `afterOperation`.
    fn after_operation(&self, _event: &OperationEvent<'_>) -> Result<()> {
        Ok(())
    }

    /// Handle `onOperationException`.
    fn on_operation_exception(&self, _event: &OperationEvent<'_>) -> Result<()> {
        Ok(())
    }
}
