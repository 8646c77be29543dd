//! Error types for the bounded sink.

use thiserror::Error;

/// Errors that can occur in the bounded sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// A required record field was not provided.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The target collection exists but is not capped as required.
    #[error("collection '{collection}' in database '{database}' exists but is not capped")]
    SchemaMismatch {
        /// Database that holds the offending collection
        database: String,
        /// Name of the offending collection
        collection: String,
    },

    /// A write could not be delivered to the store.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// The sink was used after `close()`.
    #[error("sink is closed")]
    Closed,

    /// Serialization of a record failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = SinkError::MissingField("message");
        assert_eq!(err.to_string(), "missing required field: message");

        let err = SinkError::SchemaMismatch {
            database: "test".to_string(),
            collection: "applog".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "collection 'applog' in database 'test' exists but is not capped"
        );

        let err = SinkError::Delivery("connection refused".to_string());
        assert_eq!(err.to_string(), "delivery failed: connection refused");

        let err = SinkError::Closed;
        assert_eq!(err.to_string(), "sink is closed");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SinkError>();
    }

    #[test]
    fn error_debug_format_all_variants() {
        let errors = vec![
            SinkError::MissingField("test"),
            SinkError::SchemaMismatch {
                database: "d".to_string(),
                collection: "c".to_string(),
            },
            SinkError::Delivery("t".to_string()),
            SinkError::Closed,
        ];

        for err in errors {
            let debug = format!("{err:?}");
            assert!(!debug.is_empty());
        }
    }
}
