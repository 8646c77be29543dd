//! The bounded sink front end.
//!
//! This module provides [`BoundedSink`], which owns an open capped
//! collection handle for its lifetime: records appended through the sink
//! are serialized to [`SinkDocument`]s and written as single atomic
//! inserts, and the store's oldest-first eviction is left to run as the
//! retention policy it is.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{Result, SinkError};
use crate::store::{CappedCollection, StoreClient};
use crate::types::{CollectionSpec, LogRecord, SinkDocument};

/// Sink lifecycle state. `Open` holds the collection handle; `close()`
/// swaps to `Closed`, after which appends fail deterministically.
enum SinkState {
    Open(Arc<dyn CappedCollection>),
    Closed,
}

/// Appends log records to a capacity-bounded document collection.
///
/// The sink owns its collection handle exclusively from `open` to `close`.
/// `append` is safe to call from many threads at once; the handle is
/// internally synchronized and no cross-thread ordering is guaranteed,
/// only per-thread call order. The sink never buffers and never retries:
/// a failed append surfaces as a per-call error for the dispatch layer to
/// act on.
pub struct BoundedSink {
    state: RwLock<SinkState>,
    spec: CollectionSpec,
    session: Uuid,
}

impl BoundedSink {
    /// Opens a sink against the collection named by `spec`, creating it as
    /// a capped collection if needed.
    ///
    /// Idempotent at the store level: an already-correctly-capped
    /// collection is reused unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::SchemaMismatch`] if the collection exists but
    /// is not capped, or a delivery error if the store is unreachable.
    pub fn open(client: &dyn StoreClient, spec: CollectionSpec) -> Result<Self> {
        let collection = client.open_capped(&spec)?;
        let session = Uuid::new_v4();

        tracing::debug!(
            %session,
            database = %spec.database,
            collection = %spec.collection,
            max_bytes = spec.bounds.max_bytes,
            max_documents = ?spec.bounds.max_documents,
            "opened bounded sink"
        );

        Ok(Self {
            state: RwLock::new(SinkState::Open(collection)),
            spec,
            session,
        })
    }

    /// Serializes `record` and inserts it as one atomic write.
    ///
    /// Store-side eviction of older documents is the configured retention
    /// policy and is never reported as an error.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Closed`] after `close()`, or
    /// [`SinkError::Delivery`] if the write cannot reach the store —
    /// including connection I/O timeouts, which are never reported as a
    /// silent success.
    pub fn append(&self, record: &LogRecord) -> Result<()> {
        // Clone the handle out under the read lock so a slow insert never
        // holds the lock against close().
        let collection = {
            let state = self.state.read();
            match &*state {
                SinkState::Open(collection) => Arc::clone(collection),
                SinkState::Closed => return Err(SinkError::Closed),
            }
        };

        collection.insert(SinkDocument::from(record))
    }

    /// Releases the collection handle.
    ///
    /// Safe to call multiple times. Appends already holding the handle
    /// complete; subsequent appends fail with [`SinkError::Closed`] and the
    /// sink never reconnects.
    pub fn close(&self) {
        let mut state = self.state.write();
        if matches!(*state, SinkState::Open(_)) {
            tracing::debug!(
                session = %self.session,
                database = %self.spec.database,
                collection = %self.spec.collection,
                "closed bounded sink"
            );
            *state = SinkState::Closed;
        }
    }

    /// Returns true if `close()` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(*self.state.read(), SinkState::Closed)
    }

    /// Returns the collection spec this sink was opened with.
    #[must_use]
    pub const fn spec(&self) -> &CollectionSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::types::{CappedBounds, LogLevel};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn make_record(message: &str) -> LogRecord {
        LogRecord {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            logger: "app".to_string(),
            message: message.to_string(),
            context: BTreeMap::new(),
        }
    }

    fn open_sink(store: &MemoryStore, max_documents: u64) -> BoundedSink {
        let spec = CollectionSpec::new(
            "test",
            "applog",
            CappedBounds::bytes(1024 * 1024).with_max_documents(max_documents),
        );
        BoundedSink::open(store, spec).expect("open should succeed")
    }

    #[test]
    fn append_writes_one_document() {
        let store = MemoryStore::new();
        let sink = open_sink(&store, 10);

        sink.append(&make_record("Hello log")).expect("append");

        let collection = store.capped("test", "applog").expect("collection");
        let documents = collection.read_all();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].message, "Hello log");
    }

    #[test]
    fn append_preserves_call_order() {
        let store = MemoryStore::new();
        let sink = open_sink(&store, 10);

        for i in 0..5 {
            sink.append(&make_record(&format!("message {i}"))).expect("append");
        }

        let collection = store.capped("test", "applog").expect("collection");
        let messages: Vec<String> = collection
            .read_all()
            .into_iter()
            .map(|doc| doc.message)
            .collect();
        assert_eq!(
            messages,
            vec!["message 0", "message 1", "message 2", "message 3", "message 4"]
        );
    }

    #[test]
    fn open_fails_on_uncapped_collection() {
        let store = MemoryStore::new();
        store.create_uncapped("test", "applog");

        let spec = CollectionSpec::new("test", "applog", CappedBounds::bytes(4096));
        let result = BoundedSink::open(&store, spec);
        assert!(matches!(result, Err(SinkError::SchemaMismatch { .. })));
    }

    #[test]
    fn append_after_close_fails_closed() {
        let store = MemoryStore::new();
        let sink = open_sink(&store, 10);

        sink.append(&make_record("before close")).expect("append");
        sink.close();

        let result = sink.append(&make_record("after close"));
        assert!(matches!(result, Err(SinkError::Closed)));
    }

    #[test]
    fn close_is_idempotent() {
        let store = MemoryStore::new();
        let sink = open_sink(&store, 10);

        sink.close();
        sink.close();
        assert!(sink.is_closed());
    }

    #[test]
    fn eviction_is_not_an_append_error() {
        let store = MemoryStore::new();
        let sink = open_sink(&store, 2);

        for i in 0..6 {
            let result = sink.append(&make_record(&format!("message {i}")));
            assert!(result.is_ok());
        }

        let collection = store.capped("test", "applog").expect("collection");
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn concurrent_appends() {
        let store = MemoryStore::new();
        let sink = Arc::new(open_sink(&store, 1000));

        let mut handles = Vec::new();
        for t in 0..4 {
            let sink = Arc::clone(&sink);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    sink.append(&make_record(&format!("t{t} m{i}")))
                        .expect("append should succeed");
                }
            }));
        }
        for handle in handles {
            handle.join().expect("thread should not panic");
        }

        let collection = store.capped("test", "applog").expect("collection");
        assert_eq!(collection.len(), 200);
    }

    #[test]
    fn spec_accessor() {
        let store = MemoryStore::new();
        let sink = open_sink(&store, 10);
        assert_eq!(sink.spec().database, "test");
        assert_eq!(sink.spec().collection, "applog");
    }
}
