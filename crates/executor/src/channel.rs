//! Named-topic event channel.
//!
//! Handlers run in descending priority; handlers with equal priority run in
//! attachment order. The handler list is snapshotted before a trigger so a
//! handler may attach more handlers, or call back into the storage, without
//! deadlocking.

use std::sync::Arc;

use parking_lot::RwLock;

use castore_core::Result;

use crate::{EventName, OperationEvent};

/// Event handler callback
pub type Handler = Arc<dyn Fn(&OperationEvent<'_>) -> Result<()> + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&OperationEvent<'_>) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

struct Registration {
    topic: EventName,
    priority: i32,
    handler: Handler,
}

/// Publish/subscribe channel for operation events
#[derive(Default)]
pub struct EventChannel {
    // Kept sorted by descending priority, stable for equal priorities
    registrations: RwLock<Vec<Registration>>,
}

impl EventChannel {
    /// Create an empty channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a handler to a topic.
    pub fn attach(&self, topic: EventName, handler: Handler, priority: i32) {
        let mut registrations = self.registrations.write();
        let position = registrations
            .iter()
            .position(|r| r.priority < priority)
            .unwrap_or(registrations.len());
        registrations.insert(
            position,
            Registration {
                topic,
                priority,
                handler,
            },
        );
    }

    /// Invoke every handler of the event's topic.
    ///
    /// Stops at the first handler error and returns it.
    pub fn trigger(&self, event: &OperationEvent<'_>) -> Result<()> {
        let handlers: Vec<Handler> = self
            .registrations
            .read()
            .iter()
            .filter(|r| r.topic == event.name())
            .map(|r| Arc::clone(&r.handler))
            .collect();

        for handler in handlers {
            handler(event)?;
        }
        Ok(())
    }

    /// Number of handlers attached to a topic
    pub fn handler_count(&self, topic: EventName) -> usize {
        self.registrations
            .read()
            .iter()
            .filter(|r| r.topic == topic)
            .count()
    }
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registrations = self.registrations.read();
        f.debug_struct("EventChannel")
            .field("handlers", &registrations.len())
            .finish()
    }
}
