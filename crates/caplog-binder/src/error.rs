//! Error types for the lifecycle binder.
//!
//! The two failure messages are fixed wording: existing operator tooling
//! greps logs for them.

use thiserror::Error;

use crate::context::ContextError;

/// Errors reported by the binder at container ready time.
///
/// Both variants are fatal for the current container instance; the binder
/// transitions to its failed state and makes no further activation attempt.
#[derive(Debug, Error)]
pub enum BinderError {
    /// The host disables automatic shutdown, so binding the managed
    /// lifecycle would double-manage teardown.
    #[error(
        "Do not use LifecycleBinder when isLog4jAutoShutdownDisabled is true. \
         Please use ShutdownBinder instead of LifecycleBinder."
    )]
    AutoShutdownConflict,

    /// The logging context failed to start or activate.
    #[error("Failed to initialize Log4j properly.")]
    Activation(#[source] ContextError),
}

/// Result type alias for binder operations.
pub type Result<T> = std::result::Result<T, BinderError>;
