//! Traits for capped document storage backends.
//!
//! This module provides the narrow seam between the sink and the document
//! store driver: [`StoreClient`] for opening capped collections and
//! [`CappedCollection`] for writing to one. The wire protocol and driver
//! behind these traits are external concerns.

use std::sync::Arc;

use crate::error::Result;
use crate::types::{CollectionSpec, SinkDocument};

/// Client for a document store that supports capped collections.
///
/// Implementors wrap a concrete driver or an in-process store. Opening is
/// idempotent: a collection that already exists with a capped configuration
/// is returned unchanged.
pub trait StoreClient: Send + Sync {
    /// Opens the collection named by `spec`, creating it as a capped
    /// collection if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::SchemaMismatch`](crate::error::SinkError::SchemaMismatch)
    /// if the collection exists but is not capped, or a delivery error if
    /// the store is unreachable.
    fn open_capped(&self, spec: &CollectionSpec) -> Result<Arc<dyn CappedCollection>>;
}

/// An insertion-ordered, fixed-capacity append target.
///
/// Once at capacity, each new insert implicitly evicts the oldest existing
/// document. Eviction is the intended retention policy, never an error, and
/// callers must not assume a stable document count below capacity. The sink
/// never issues explicit deletes.
///
/// `insert` must be safe to call from multiple threads concurrently; each
/// document write is atomic and partial documents are never visible.
pub trait CappedCollection: Send + Sync {
    /// Inserts a single document as one atomic write.
    ///
    /// Insertion order equals call order for a single-threaded caller.
    ///
    /// # Errors
    ///
    /// Returns a delivery error if the write cannot reach the store.
    fn insert(&self, document: SinkDocument) -> Result<()>;

    /// Reads back all documents currently present, in insertion order.
    fn read_all(&self) -> Vec<SinkDocument>;

    /// Returns the number of documents currently present.
    fn len(&self) -> usize;

    /// Returns true if the collection holds no documents.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
