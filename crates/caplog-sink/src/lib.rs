//! # caplog-sink
//!
//! Bounded persistent log sink backed by capped document collections.
//!
//! This crate provides:
//!
//! - [`LogRecord`] / [`LogLevel`] — Structured log records
//! - [`SinkDocument`] — The fixed on-the-wire document schema
//! - [`CappedBounds`] / [`CollectionSpec`] — Collection configuration
//! - [`StoreClient`] / [`CappedCollection`] — Abstract store backend traits
//! - [`MemoryStore`] / [`MemoryCollection`] — In-process capped storage
//! - [`BoundedSink`] — The append/close front end
//!
//! A capped collection is insertion-ordered and fixed-capacity: once full,
//! each new insert evicts the oldest document. The sink treats that
//! eviction as the retention policy, not as data loss.
//!
//! ## Example
//!
//! ```rust
//! use caplog_sink::{BoundedSink, CappedBounds, CollectionSpec, LogLevel, LogRecord, MemoryStore};
//! use chrono::Utc;
//!
//! let store = MemoryStore::new();
//! let spec = CollectionSpec::new("test", "applog", CappedBounds::bytes(4096).with_max_documents(100));
//! let sink = BoundedSink::open(&store, spec)?;
//!
//! let record = LogRecord::builder()
//!     .timestamp(Utc::now())
//!     .level(LogLevel::Info)
//!     .logger("app")
//!     .message("Hello log")
//!     .build()?;
//! sink.append(&record)?;
//! sink.close();
//! # Ok::<(), caplog_sink::SinkError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod sink;
pub mod store;
pub mod types;

// Re-export main types
pub use error::{Result, SinkError};
pub use memory::{MemoryCollection, MemoryStore};
pub use sink::BoundedSink;
pub use store::{CappedCollection, StoreClient};
pub use types::{CappedBounds, CollectionSpec, LogLevel, LogRecord, LogRecordBuilder, SinkDocument};
