//! Lifecycle binding of the logging context to container signals.
//!
//! This module provides:
//! - [`ContainerSignal`] — The two signals emitted by the host
//! - [`BinderState`] — The binder's state machine
//! - [`LifecycleBinder`] — Managed activation and teardown
//! - [`ShutdownBinder`] — Teardown-only alternative for hosts that drive
//!   startup themselves

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::attributes::LOGGING_CONTEXT_ATTRIBUTE;
use crate::config::{ContainerEnv, LifecycleConfig};
use crate::context::LoggingContext;
use crate::error::{BinderError, Result};

/// A container lifecycle signal.
///
/// The host emits each at most once per container instance: `Ready` before
/// `Shutdown` when both occur, though `Shutdown` may arrive with no prior
/// `Ready` after an abnormal or partial startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerSignal {
    /// The container finished starting.
    Ready,
    /// The container is shutting down.
    Shutdown,
}

/// Binder state machine.
///
/// `Unbound` is initial. `Bound` after successful activation. `Failed` is
/// terminal for the current container instance; only a fresh binder in a
/// restarted process leaves it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinderState {
    /// No activation has happened.
    #[default]
    Unbound,
    /// The logging context is active and published.
    Bound,
    /// Activation failed or was rejected; no further attempts are made.
    Failed,
}

/// Binds the process-wide logging context to container start/stop.
///
/// The binder holds only a reference to the injected context; it never
/// constructs it. On ready it activates the context and publishes the
/// handle under [`LOGGING_CONTEXT_ATTRIBUTE`]; on shutdown it retrieves
/// the handle from the registry and deactivates it. Shutdown with no prior
/// successful ready is a no-op.
pub struct LifecycleBinder {
    context: Arc<dyn LoggingContext>,
    state: BinderState,
}

impl LifecycleBinder {
    /// Creates a binder around the injected logging context.
    #[must_use]
    pub fn new(context: Arc<dyn LoggingContext>) -> Self {
        Self {
            context,
            state: BinderState::Unbound,
        }
    }

    /// Returns the current binder state.
    #[must_use]
    pub const fn state(&self) -> BinderState {
        self.state
    }

    /// Dispatches a container signal to the matching entry point.
    ///
    /// # Errors
    ///
    /// Propagates activation errors from [`Self::on_container_ready`].
    pub fn on_signal(&mut self, signal: ContainerSignal, env: &ContainerEnv) -> Result<()> {
        match signal {
            ContainerSignal::Ready => self.on_container_ready(env),
            ContainerSignal::Shutdown => {
                self.on_container_shutdown(env);
                Ok(())
            }
        }
    }

    /// Activates the logging context in response to the container's ready
    /// signal.
    ///
    /// Reads the lifecycle configuration once. A host that disables
    /// automatic shutdown is rejected outright: an externally-driven
    /// teardown path is in effect, and binding the managed lifecycle on
    /// top of it would double-manage shutdown. On success the context
    /// handle is published into the attribute registry and the binder
    /// transitions to [`BinderState::Bound`].
    ///
    /// # Errors
    ///
    /// Returns [`BinderError::AutoShutdownConflict`] on incompatible
    /// configuration, or [`BinderError::Activation`] if `start`/
    /// `set_active` fail. Either failure is terminal: the binder moves to
    /// [`BinderState::Failed`] and never retries, since partial activation
    /// of a process-wide context is unsafe to repeat automatically.
    pub fn on_container_ready(&mut self, env: &ContainerEnv) -> Result<()> {
        if self.state != BinderState::Unbound {
            // Double ready is a host programming error; do no activation work.
            tracing::warn!(state = ?self.state, "ready signal ignored");
            return Ok(());
        }

        let config = LifecycleConfig::from_env(env);
        if config.auto_shutdown_disabled {
            self.state = BinderState::Failed;
            return Err(BinderError::AutoShutdownConflict);
        }

        let activated = self
            .context
            .start()
            .and_then(|()| self.context.set_active());
        if let Err(cause) = activated {
            self.state = BinderState::Failed;
            return Err(BinderError::Activation(cause));
        }

        env.attributes()
            .set(LOGGING_CONTEXT_ATTRIBUTE, Arc::clone(&self.context));
        self.state = BinderState::Bound;
        tracing::debug!("logging context bound to container lifecycle");
        Ok(())
    }

    /// Deactivates the logging context in response to the container's
    /// shutdown signal.
    ///
    /// Looks the context up via the attribute registry; if nothing was
    /// published (no prior successful ready, or an earlier shutdown
    /// already ran) this is a no-op and `clear_active`/`stop` are never
    /// invoked. Idempotent: a second call observes the cleared registry.
    pub fn on_container_shutdown(&mut self, env: &ContainerEnv) {
        if deactivate(env) {
            self.state = BinderState::Unbound;
        }
    }
}

/// Teardown-only binder.
///
/// The alternative component for hosts that set
/// [`AUTO_SHUTDOWN_DISABLED_PARAM`](crate::config::AUTO_SHUTDOWN_DISABLED_PARAM)
/// and drive startup themselves: it has no ready-side behavior and only
/// deactivates whatever context was published into the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShutdownBinder;

impl ShutdownBinder {
    /// Creates a new teardown-only binder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Deactivates the published logging context, if any.
    pub fn on_container_shutdown(&self, env: &ContainerEnv) {
        deactivate(env);
    }
}

/// Shared teardown: clear the active flag before stopping, so no in-flight
/// log call observes an active context mid-teardown, then clear the
/// registry entry so a repeated shutdown no-ops. Returns true if a context
/// was found and deactivated.
fn deactivate(env: &ContainerEnv) -> bool {
    let Some(context) = env.attributes().get(LOGGING_CONTEXT_ATTRIBUTE) else {
        tracing::debug!("shutdown signal with no published logging context");
        return false;
    };

    context.clear_active();
    context.stop();
    env.attributes().remove(LOGGING_CONTEXT_ATTRIBUTE);
    tracing::debug!("logging context unbound from container lifecycle");
    true
}
