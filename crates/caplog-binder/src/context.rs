//! The logging context seam.
//!
//! This module provides the [`LoggingContext`] trait, the binder's view of
//! the process-wide logger configuration. The binder only toggles
//! activation through this trait; it never constructs or owns the context.

use thiserror::Error;

/// An error raised by the logging context during activation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ContextError {
    message: String,
}

impl ContextError {
    /// Creates a new context error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Process-wide logging context lifecycle.
///
/// The context is a singleton owned by the hosting process for its whole
/// lifetime. Activation (`start` then `set_active`) happens at container
/// ready time; deactivation (`clear_active` then `stop`, in that order, so
/// no in-flight log call observes an active context mid-teardown) at
/// container shutdown. Teardown is infallible: during shutdown there is no
/// caller left that could act on a failure.
pub trait LoggingContext: Send + Sync {
    /// Starts the context.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying configuration cannot be started.
    fn start(&self) -> Result<(), ContextError>;

    /// Marks the running context as the active one for the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the context cannot be activated.
    fn set_active(&self) -> Result<(), ContextError>;

    /// Clears the active flag. Called before `stop`.
    fn clear_active(&self);

    /// Stops the context.
    fn stop(&self);
}

/// A no-op logging context for testing or disabled scenarios.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopContext;

impl NoopContext {
    /// Creates a new no-op context.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LoggingContext for NoopContext {
    fn start(&self) -> Result<(), ContextError> {
        Ok(())
    }

    fn set_active(&self) -> Result<(), ContextError> {
        Ok(())
    }

    fn clear_active(&self) {
        // Intentionally does nothing
    }

    fn stop(&self) {
        // Intentionally does nothing
    }
}
