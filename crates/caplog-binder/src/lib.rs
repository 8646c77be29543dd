//! # caplog-binder
//!
//! Container lifecycle binding for a process-wide logging context.
//!
//! This crate provides:
//!
//! - [`LoggingContext`] — The injected context lifecycle seam
//! - [`AttributeStore`] / [`MemoryAttributes`] — Container-scoped registry
//! - [`ContainerEnv`] / [`LifecycleConfig`] — Host environment and typed config
//! - [`LifecycleBinder`] — Managed activation/teardown state machine
//! - [`ShutdownBinder`] — Teardown-only alternative
//!
//! The binder activates the logging context when the container signals
//! ready, publishes the handle under [`LOGGING_CONTEXT_ATTRIBUTE`], and
//! deactivates it at shutdown. A host that disables automatic shutdown
//! (`isLog4jAutoShutdownDisabled=true`) is rejected at ready time rather
//! than silently double-managing teardown.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use caplog_binder::{ContainerEnv, LifecycleBinder, MemoryAttributes, NoopContext};
//!
//! let env = ContainerEnv::new(Arc::new(MemoryAttributes::new()));
//! let mut binder = LifecycleBinder::new(Arc::new(NoopContext::new()));
//!
//! binder.on_container_ready(&env)?;
//! binder.on_container_shutdown(&env);
//! # Ok::<(), caplog_binder::BinderError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attributes;
pub mod binder;
pub mod config;
pub mod context;
pub mod error;

// Re-export main types
pub use attributes::{AttributeStore, MemoryAttributes, LOGGING_CONTEXT_ATTRIBUTE};
pub use binder::{BinderState, ContainerSignal, LifecycleBinder, ShutdownBinder};
pub use config::{ContainerEnv, LifecycleConfig, AUTO_SHUTDOWN_DISABLED_PARAM};
pub use context::{ContextError, LoggingContext, NoopContext};
pub use error::{BinderError, Result};
