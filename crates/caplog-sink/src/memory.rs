//! In-process capped collection storage.
//!
//! This module provides:
//! - [`MemoryStore`] — An in-process [`StoreClient`] keyed by database and
//!   collection name
//! - [`MemoryCollection`] — A thread-safe, insertion-ordered collection that
//!   evicts oldest-first once a byte or document-count bound is reached
//!
//! It serves as the embedded backend and as the test double for sinks that
//! deploy against a remote driver in production.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::{Result, SinkError};
use crate::store::{CappedCollection, StoreClient};
use crate::types::{CappedBounds, CollectionSpec, SinkDocument};

/// A stored document together with its accounted size.
#[derive(Debug, Clone)]
struct StoredDocument {
    document: SinkDocument,
    size: u64,
}

/// Mutable collection state behind one lock, so eviction and insertion are
/// a single atomic step from the caller's point of view.
#[derive(Debug, Default)]
struct CollectionInner {
    documents: VecDeque<StoredDocument>,
    total_bytes: u64,
}

/// A capped, insertion-ordered in-memory collection.
///
/// Document size is accounted as the serialized JSON length. Once either
/// bound is reached, each insert evicts the oldest documents until the
/// collection fits again; eviction is silent, per the capped contract.
pub struct MemoryCollection {
    bounds: CappedBounds,
    inner: Mutex<CollectionInner>,
}

impl MemoryCollection {
    fn new(bounds: CappedBounds) -> Self {
        Self {
            bounds,
            inner: Mutex::new(CollectionInner::default()),
        }
    }

    /// Returns the bounds this collection was created with.
    #[must_use]
    pub const fn bounds(&self) -> CappedBounds {
        self.bounds
    }
}

impl CappedCollection for MemoryCollection {
    fn insert(&self, document: SinkDocument) -> Result<()> {
        let size = serde_json::to_vec(&document)?.len() as u64;
        if size > self.bounds.max_bytes {
            // A single document larger than the byte ceiling can never fit,
            // matching store-side rejection of oversized writes.
            return Err(SinkError::Delivery(format!(
                "document of {size} bytes exceeds collection ceiling of {} bytes",
                self.bounds.max_bytes
            )));
        }

        let mut inner = self.inner.lock();
        inner.documents.push_back(StoredDocument { document, size });
        inner.total_bytes += size;

        // Evict oldest-first until both bounds hold again.
        while inner.total_bytes > self.bounds.max_bytes
            || self
                .bounds
                .max_documents
                .is_some_and(|max| inner.documents.len() as u64 > max)
        {
            if let Some(evicted) = inner.documents.pop_front() {
                inner.total_bytes -= evicted.size;
            } else {
                break;
            }
        }

        Ok(())
    }

    fn read_all(&self) -> Vec<SinkDocument> {
        self.inner
            .lock()
            .documents
            .iter()
            .map(|stored| stored.document.clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.inner.lock().documents.len()
    }
}

/// How a named collection exists inside a [`MemoryStore`].
enum Registered {
    Capped(Arc<MemoryCollection>),
    Uncapped,
}

/// In-process store that hands out capped collections by name.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<(String, String), Registered>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `collection` in `database` as an ordinary, uncapped
    /// collection.
    ///
    /// A later [`StoreClient::open_capped`] against that name fails with a
    /// schema mismatch, mirroring a store where the collection pre-exists
    /// with the wrong configuration.
    pub fn create_uncapped(&self, database: impl Into<String>, collection: impl Into<String>) {
        self.collections
            .write()
            .insert((database.into(), collection.into()), Registered::Uncapped);
    }

    /// Returns the capped collection registered under the given names, if
    /// one exists. Read-side consumers use this to query documents without
    /// going through a sink.
    #[must_use]
    pub fn capped(&self, database: &str, collection: &str) -> Option<Arc<MemoryCollection>> {
        let key = (database.to_string(), collection.to_string());
        match self.collections.read().get(&key) {
            Some(Registered::Capped(existing)) => Some(Arc::clone(existing)),
            _ => None,
        }
    }
}

impl StoreClient for MemoryStore {
    fn open_capped(&self, spec: &CollectionSpec) -> Result<Arc<dyn CappedCollection>> {
        let key = (spec.database.clone(), spec.collection.clone());
        let mut collections = self.collections.write();

        if let Some(registered) = collections.get(&key) {
            return match registered {
                // Idempotent re-open: the existing capped collection is
                // returned unchanged, bounds and contents intact.
                Registered::Capped(existing) => {
                    Ok(Arc::clone(existing) as Arc<dyn CappedCollection>)
                }
                Registered::Uncapped => Err(SinkError::SchemaMismatch {
                    database: spec.database.clone(),
                    collection: spec.collection.clone(),
                }),
            };
        }

        let created = Arc::new(MemoryCollection::new(spec.bounds));
        collections.insert(key, Registered::Capped(Arc::clone(&created)));
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LogLevel, LogRecord};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn make_document(message: &str) -> SinkDocument {
        let record = LogRecord {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            logger: "test".to_string(),
            message: message.to_string(),
            context: BTreeMap::new(),
        };
        SinkDocument::from(&record)
    }

    fn spec_with_docs(max_documents: u64) -> CollectionSpec {
        CollectionSpec::new(
            "test",
            "applog",
            CappedBounds::bytes(1024 * 1024).with_max_documents(max_documents),
        )
    }

    #[test]
    fn open_creates_capped_collection() {
        let store = MemoryStore::new();
        let collection = store
            .open_capped(&spec_with_docs(10))
            .expect("open should succeed");
        assert!(collection.is_empty());
    }

    #[test]
    fn open_is_idempotent() {
        let store = MemoryStore::new();
        let spec = spec_with_docs(10);

        let first = store.open_capped(&spec).expect("first open");
        first.insert(make_document("kept")).expect("insert");

        let second = store.open_capped(&spec).expect("second open");
        assert_eq!(second.len(), 1);
        assert_eq!(second.read_all()[0].message, "kept");
    }

    #[test]
    fn open_rejects_uncapped_collection() {
        let store = MemoryStore::new();
        store.create_uncapped("test", "applog");

        let result = store.open_capped(&spec_with_docs(10));
        assert!(matches!(
            result,
            Err(SinkError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn eviction_by_document_count() {
        let store = MemoryStore::new();
        let collection = store
            .open_capped(&spec_with_docs(3))
            .expect("open should succeed");

        for i in 0..5 {
            collection
                .insert(make_document(&format!("message {i}")))
                .expect("insert should succeed");
        }

        let documents = collection.read_all();
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0].message, "message 2");
        assert_eq!(documents[2].message, "message 4");
    }

    #[test]
    fn eviction_by_bytes() {
        let store = MemoryStore::new();
        let doc_size = serde_json::to_vec(&make_document("xxxxxxxxxx"))
            .expect("serialize")
            .len() as u64;
        // Room for two documents, not three.
        let spec = CollectionSpec::new("test", "applog", CappedBounds::bytes(doc_size * 2));
        let collection = store.open_capped(&spec).expect("open should succeed");

        collection.insert(make_document("aaaaaaaaaa")).expect("insert");
        collection.insert(make_document("bbbbbbbbbb")).expect("insert");
        collection.insert(make_document("cccccccccc")).expect("insert");

        let documents = collection.read_all();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].message, "bbbbbbbbbb");
        assert_eq!(documents[1].message, "cccccccccc");
    }

    #[test]
    fn oversized_document_is_rejected() {
        let store = MemoryStore::new();
        let spec = CollectionSpec::new("test", "applog", CappedBounds::bytes(16));
        let collection = store.open_capped(&spec).expect("open should succeed");

        let result = collection.insert(make_document("far too large for the ceiling"));
        assert!(matches!(result, Err(SinkError::Delivery(_))));
        assert!(collection.is_empty());
    }

    #[test]
    fn eviction_is_silent() {
        let store = MemoryStore::new();
        let collection = store
            .open_capped(&spec_with_docs(1))
            .expect("open should succeed");

        // Every insert past the first evicts, and every insert still succeeds.
        for i in 0..10 {
            let result = collection.insert(make_document(&format!("message {i}")));
            assert!(result.is_ok());
        }
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn capped_accessor_finds_collection() {
        let store = MemoryStore::new();
        let _ = store.open_capped(&spec_with_docs(5)).expect("open");

        assert!(store.capped("test", "applog").is_some());
        assert!(store.capped("test", "missing").is_none());
    }

    #[test]
    fn concurrent_inserts_respect_bounds() {
        let store = MemoryStore::new();
        let collection = store
            .open_capped(&spec_with_docs(8))
            .expect("open should succeed");

        let mut handles = Vec::new();
        for t in 0..4 {
            let collection = store.capped("test", "applog").expect("collection");
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    collection
                        .insert(make_document(&format!("t{t} m{i}")))
                        .expect("insert should succeed");
                }
            }));
        }
        for handle in handles {
            handle.join().expect("thread should not panic");
        }

        assert_eq!(collection.len(), 8);
    }
}
