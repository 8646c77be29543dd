//! Container-scoped attribute registry.
//!
//! The host environment mandates registry-style lookup for shared handles:
//! the binder publishes the active logging context under a fixed key so
//! that the shutdown path, and consumers such as request-scoped logging
//! helpers, retrieve the same instance. Attribute lifetime matches the
//! container instance; the container synchronizes access, so the binder
//! adds no locking of its own around publish/lookup.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::context::LoggingContext;

/// Well-known attribute key under which the active logging context handle
/// is published. Fixed: external consumers read the same key.
pub const LOGGING_CONTEXT_ATTRIBUTE: &str = "caplog.binder.LoggingContext.INSTANCE";

/// Container-scoped key/value registry for logging context handles.
pub trait AttributeStore: Send + Sync {
    /// Publishes a context handle under `key`, replacing any previous one.
    fn set(&self, key: &str, value: Arc<dyn LoggingContext>);

    /// Retrieves the handle published under `key`, if any.
    fn get(&self, key: &str) -> Option<Arc<dyn LoggingContext>>;

    /// Removes the handle published under `key`. Removing an absent key is
    /// a no-op.
    fn remove(&self, key: &str);
}

/// In-memory attribute registry for embedding and tests.
#[derive(Default)]
pub struct MemoryAttributes {
    attributes: RwLock<HashMap<String, Arc<dyn LoggingContext>>>,
}

impl MemoryAttributes {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeStore for MemoryAttributes {
    fn set(&self, key: &str, value: Arc<dyn LoggingContext>) {
        self.attributes.write().insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<Arc<dyn LoggingContext>> {
        self.attributes.read().get(key).map(Arc::clone)
    }

    fn remove(&self, key: &str) {
        self.attributes.write().remove(key);
    }
}
