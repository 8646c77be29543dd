//! Container environment and lifecycle configuration.
//!
//! Raw init-parameter strings are parsed exactly once, at the container
//! ready boundary, into a typed [`LifecycleConfig`]; nothing downstream
//! re-examines the raw values.

use std::collections::HashMap;
use std::sync::Arc;

use crate::attributes::AttributeStore;

/// Init parameter that marks automatic shutdown as externally managed.
/// Fixed name: deployment descriptors and operators rely on it.
pub const AUTO_SHUTDOWN_DISABLED_PARAM: &str = "isLog4jAutoShutdownDisabled";

/// Typed lifecycle configuration, read once at container ready time and
/// immutable thereafter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// True when the host disables the managed shutdown path, implying an
    /// externally-driven teardown is in effect instead.
    pub auto_shutdown_disabled: bool,
}

impl LifecycleConfig {
    /// Parses the configuration from the container environment.
    ///
    /// The raw parameter value is compared ASCII case-insensitively against
    /// `"true"`; anything else, including an absent parameter, means the
    /// managed lifecycle is in effect.
    #[must_use]
    pub fn from_env(env: &ContainerEnv) -> Self {
        let auto_shutdown_disabled = env
            .init_param(AUTO_SHUTDOWN_DISABLED_PARAM)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));
        Self {
            auto_shutdown_disabled,
        }
    }
}

/// What the hosting container hands to the binder entry points: the
/// container-scoped attribute registry plus read-only init parameters.
pub struct ContainerEnv {
    attributes: Arc<dyn AttributeStore>,
    init_params: HashMap<String, String>,
}

impl ContainerEnv {
    /// Creates an environment around the given attribute registry.
    #[must_use]
    pub fn new(attributes: Arc<dyn AttributeStore>) -> Self {
        Self {
            attributes,
            init_params: HashMap::new(),
        }
    }

    /// Adds an init parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.init_params.insert(name.into(), value.into());
        self
    }

    /// Looks up an init parameter by name.
    #[must_use]
    pub fn init_param(&self, name: &str) -> Option<&str> {
        self.init_params.get(name).map(String::as_str)
    }

    /// Returns the container-scoped attribute registry.
    #[must_use]
    pub fn attributes(&self) -> &dyn AttributeStore {
        self.attributes.as_ref()
    }
}
