//! Operation executor.
//!
//! The executor wraps one backend invocation in the event envelope:
//!
//! ```text
//! 1. trigger beforeOperation
//! 2. invoke the backend primitive
//! 3a. Ok  -> trigger afterOperation(result), return result
//! 3b. Err -> trigger onOperationException(error), return the same error
//! ```
//!
//! Listener errors are not operation errors: a failing listener ends the
//! call immediately and `onOperationException` is not fired for it.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, trace, warn};

use castore_core::{OperationArguments, Result};

use crate::channel::handler;
use crate::{EventChannel, EventName, KeyValueStore, OperationEvent, OperationListener, Output};

/// Runs storage operations inside the before/after/exception event envelope
#[derive(Debug, Default)]
pub struct Executor {
    // Created on first listener attachment
    channel: OnceCell<EventChannel>,
}

impl Executor {
    /// Create an executor with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Event channel, created on first use
    pub fn channel(&self) -> &EventChannel {
        self.channel.get_or_init(EventChannel::new)
    }

    /// Check if the event channel has been created
    pub fn has_channel(&self) -> bool {
        self.channel.get().is_some()
    }

    /// Attach a listener to all three operation events at one priority.
    pub fn add_listener(&self, listener: Arc<dyn OperationListener>, priority: i32) {
        let channel = self.channel();

        let l = Arc::clone(&listener);
        channel.attach(
            EventName::BeforeOperation,
            handler(move |e| l.before_operation(e)),
            priority,
        );
        let l = Arc::clone(&listener);
        channel.attach(
            EventName::AfterOperation,
            handler(move |e| l.after_operation(e)),
            priority,
        );
        channel.attach(
            EventName::OnOperationException,
            handler(move |e| listener.on_operation_exception(e)),
            priority,
        );
    }

    /// Execute one operation.
    ///
    /// `invoke` receives the same argument set the events expose and may
    /// write outputs (CAS tokens) back into it before `afterOperation` fires.
    pub fn execute<F>(
        &self,
        target: &dyn KeyValueStore,
        arguments: &mut OperationArguments,
        invoke: F,
    ) -> Result<Output>
    where
        F: FnOnce(&mut OperationArguments) -> Result<Output>,
    {
        let operation = arguments.operation();
        trace!(operation = %operation, "beforeOperation");
        self.fire(&OperationEvent::before(target, operation, arguments))?;

        match invoke(&mut *arguments) {
            Ok(output) => {
                debug!(
                    operation = %operation,
                    write = operation.is_write(),
                    "operation completed"
                );
                self.fire(&OperationEvent::after(target, operation, arguments, &output))?;
                Ok(output)
            }
            Err(err) => {
                warn!(operation = %operation, error = %err, "operation failed");
                self.fire(&OperationEvent::exception(target, operation, arguments, &err))?;
                Err(err)
            }
        }
    }

    fn fire(&self, event: &OperationEvent<'_>) -> Result<()> {
        match self.channel.get() {
            Some(channel) => channel.trigger(event),
            None => Ok(()),
        }
    }
}
