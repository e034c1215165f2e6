//! Dispatcher configuration.
//!
//! Hosts configure the subsystem at startup by providing:
//! - `HandlerPolicy`: how several events registered under one key are run
//! - `VocationConfig`: the vocation table used to resolve names in specs
//! - `MoveEventsConfig`: combines all configuration
//!
//! The configuration can be built in code or loaded from TOML:
//!
//! ```
//! use movement_events::core::{HandlerPolicy, MoveEventsConfig, VocationId};
//!
//! let config = MoveEventsConfig::from_toml_str(r#"
//!     handler_policy = "first-only"
//!
//!     [[vocations]]
//!     id = 4
//!     name = "Knight"
//! "#).unwrap();
//!
//! assert_eq!(config.handler_policy, HandlerPolicy::FirstOnly);
//! assert_eq!(config.vocation_id("knight"), Some(VocationId::new(4)));
//! ```

use serde::{Deserialize, Serialize};

use super::VocationId;
use crate::error::{MoveEventError, Result};

/// How the events of one resolved bucket are run.
///
/// A bucket is the ordered list of events registered for one kind under one
/// key. Events always run in registration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandlerPolicy {
    /// Run events until one returns a non-zero outcome.
    #[default]
    UntilHandled,
    /// Run only the first event of the bucket.
    FirstOnly,
    /// Run every event; the first non-zero outcome is reported.
    All,
}

/// One row of the vocation table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocationConfig {
    pub id: VocationId,
    pub name: String,
}

impl VocationConfig {
    /// Create a new vocation entry.
    pub fn new(id: VocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Complete subsystem configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveEventsConfig {
    /// How multiple events under one key are run.
    pub handler_policy: HandlerPolicy,

    /// Vocations known to the server.
    pub vocations: Vec<VocationConfig>,

    /// Log a warning when an event lands in a bucket that already holds an
    /// event for the same slot (or any event, for positions).
    pub warn_on_duplicates: bool,
}

impl Default for MoveEventsConfig {
    fn default() -> Self {
        Self {
            handler_policy: HandlerPolicy::default(),
            vocations: Vec::new(),
            warn_on_duplicates: true,
        }
    }
}

impl MoveEventsConfig {
    /// Create a default configuration with no vocations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MoveEventError::Parse(e.to_string()))
    }

    /// Set the handler policy (builder pattern).
    #[must_use]
    pub fn with_handler_policy(mut self, policy: HandlerPolicy) -> Self {
        self.handler_policy = policy;
        self
    }

    /// Add a vocation (builder pattern).
    #[must_use]
    pub fn with_vocation(mut self, id: VocationId, name: impl Into<String>) -> Self {
        self.vocations.push(VocationConfig::new(id, name));
        self
    }

    /// Silence duplicate registration warnings (builder pattern).
    #[must_use]
    pub fn quiet_duplicates(mut self) -> Self {
        self.warn_on_duplicates = false;
        self
    }

    /// Resolve a vocation name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn vocation_id(&self, name: &str) -> Option<VocationId> {
        let name = name.trim();
        self.vocations
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .map(|v| v.id)
    }
}
