//! Core types for the bounded sink.
//!
//! This module provides:
//! - [`LogLevel`] — Severity levels for log records
//! - [`LogRecord`] — An immutable record produced by the event pipeline
//! - [`SinkDocument`] — The fixed on-the-wire document schema
//! - [`CappedBounds`] / [`CollectionSpec`] — Capped collection configuration

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log severity levels, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed debugging information
    Trace = 0,
    /// Debugging information
    Debug = 1,
    /// General information
    Info = 2,
    /// Warning conditions
    Warn = 3,
    /// Error conditions
    Error = 4,
}

impl LogLevel {
    /// Returns the string representation of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// An immutable log record handed to the sink by the event pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// When the record was created
    pub timestamp: DateTime<Utc>,
    /// Severity level
    pub level: LogLevel,
    /// Name of the logger that produced the record
    pub logger: String,
    /// The rendered log message
    pub message: String,
    /// Thread-context key/value pairs, if any
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl LogRecord {
    /// Creates a new record builder.
    #[must_use]
    pub fn builder() -> LogRecordBuilder {
        LogRecordBuilder::default()
    }
}

/// Builder for constructing log records.
#[derive(Debug, Default)]
pub struct LogRecordBuilder {
    timestamp: Option<DateTime<Utc>>,
    level: Option<LogLevel>,
    logger: Option<String>,
    message: Option<String>,
    context: BTreeMap<String, String>,
}

impl LogRecordBuilder {
    /// Sets the timestamp.
    #[must_use]
    pub const fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub const fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the logger name.
    #[must_use]
    pub fn logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    /// Sets the rendered message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a thread-context entry.
    #[must_use]
    pub fn context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Builds the record, returning an error if required fields are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set.
    pub fn build(self) -> Result<LogRecord, crate::error::SinkError> {
        let timestamp = self
            .timestamp
            .ok_or(crate::error::SinkError::MissingField("timestamp"))?;
        let level = self
            .level
            .ok_or(crate::error::SinkError::MissingField("level"))?;
        let logger = self
            .logger
            .ok_or(crate::error::SinkError::MissingField("logger"))?;
        let message = self
            .message
            .ok_or(crate::error::SinkError::MissingField("message"))?;

        Ok(LogRecord {
            timestamp,
            level,
            logger,
            message,
            context: self.context,
        })
    }
}

/// The on-the-wire document written for each [`LogRecord`].
///
/// Field names are a compatibility contract: downstream readers query by
/// these exact names. One document is written per record; documents are
/// never updated or deleted by the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkDocument {
    /// Record creation time as milliseconds since the Unix epoch
    #[serde(rename = "timestampMillis")]
    pub timestamp_millis: i64,
    /// Lowercase severity level
    pub level: String,
    /// Name of the originating logger
    #[serde(rename = "loggerName")]
    pub logger_name: String,
    /// The rendered log message, byte-for-byte
    pub message: String,
    /// Thread-context map; omitted from the document when empty
    #[serde(
        rename = "contextMap",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub context_map: BTreeMap<String, String>,
}

impl From<&LogRecord> for SinkDocument {
    fn from(record: &LogRecord) -> Self {
        Self {
            timestamp_millis: record.timestamp.timestamp_millis(),
            level: record.level.as_str().to_string(),
            logger_name: record.logger.clone(),
            message: record.message.clone(),
            context_map: record.context.clone(),
        }
    }
}

/// Capacity bounds for a capped collection.
///
/// The store evicts the oldest document when either bound is reached,
/// whichever trips first. `max_bytes` is a hard ceiling enforced by the
/// store; the sink performs no pre-flight size estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CappedBounds {
    /// Maximum collection size in bytes
    pub max_bytes: u64,
    /// Optional additional ceiling on the document count
    pub max_documents: Option<u64>,
}

impl CappedBounds {
    /// Creates bounds with a byte ceiling only.
    #[must_use]
    pub const fn bytes(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            max_documents: None,
        }
    }

    /// Adds a document-count ceiling.
    #[must_use]
    pub const fn with_max_documents(mut self, max_documents: u64) -> Self {
        self.max_documents = Some(max_documents);
        self
    }
}

/// Identifies the capped collection the sink writes to.
///
/// Supplied via configuration, never hardcoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
    /// Database name
    pub database: String,
    /// Collection name
    pub collection: String,
    /// Capacity bounds for the collection
    pub bounds: CappedBounds,
}

impl CollectionSpec {
    /// Creates a new collection spec.
    #[must_use]
    pub fn new(
        database: impl Into<String>,
        collection: impl Into<String>,
        bounds: CappedBounds,
    ) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
            bounds,
        }
    }
}
