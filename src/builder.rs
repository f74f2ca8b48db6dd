//! Store construction.

use std::sync::Arc;

use tracing::info;

use castore_core::Result;
use castore_executor::{OperationListener, Storage};
use castore_storage::{Clock, MemoryBackend, MemoryConfig};

/// Storage over the in-memory reference backend
pub type MemoryStore = Storage<MemoryBackend>;

/// Create a memory store with default settings.
pub fn memory_store() -> MemoryStore {
    Storage::new(MemoryBackend::new())
}

/// Builder for a [`MemoryStore`].
///
/// # Example
///
/// ```ignore
/// let store = StoreBuilder::new()
///     .relative_expiry_limit(3600)
///     .listener(Arc::new(AuditListener::default()), 10)
///     .open()?;
/// ```
pub struct StoreBuilder {
    config: MemoryConfig,
    clock: Option<Arc<dyn Clock>>,
    listeners: Vec<(Arc<dyn OperationListener>, i32)>,
}

impl StoreBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: MemoryConfig::default(),
            clock: None,
            listeners: Vec::new(),
        }
    }

    /// Create a builder from a TOML document, see [`MemoryConfig`].
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(Self::new().config(MemoryConfig::from_toml_str(s)?))
    }

    /// Replace the whole backend configuration.
    pub fn config(mut self, config: MemoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Expiries above this many seconds are treated as absolute timestamps.
    pub fn relative_expiry_limit(mut self, secs: i64) -> Self {
        self.config.relative_expiry_limit_secs = secs;
        self
    }

    /// Pre-allocate room for this many entries.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Use a custom time source.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Attach a listener at `priority` when the store opens.
    pub fn listener(mut self, listener: Arc<dyn OperationListener>, priority: i32) -> Self {
        self.listeners.push((listener, priority));
        self
    }

    /// Validate the configuration and build the store.
    pub fn open(self) -> Result<MemoryStore> {
        self.config.validate()?;

        let mut backend = MemoryBackend::with_config(&self.config);
        if let Some(clock) = self.clock {
            backend = backend.with_clock(clock);
        }

        let store = Storage::new(backend);
        let listeners = self.listeners.len();
        for (listener, priority) in self.listeners {
            store.add_operation_listener(listener, priority);
        }

        info!(
            relative_expiry_limit_secs = self.config.relative_expiry_limit_secs,
            listeners, "opened memory store"
        );
        Ok(store)
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreBuilder")
            .field("config", &self.config)
            .field("custom_clock", &self.clock.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
