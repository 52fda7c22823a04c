//! Agent configuration
//!
//! The configuration loader (file discovery and parsing) lives outside this
//! crate; these types are its output and are treated as immutable for the
//! process lifetime.

use std::time::Duration;

use crate::error::{AgentError, Result};

/// Identity the agent publishes itself under
#[derive(Debug, Clone, Default)]
pub struct AgentIdentity {
    /// Path segment the agent is addressed by; must be non-empty
    pub name: String,

    /// Free-text description, informational only
    pub description: String,

    /// Credential presented to the signalling server, opaque to this core
    pub auth_token: String,
}

impl AgentIdentity {
    /// Create an identity with the given published name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the auth token
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = token.into();
        self
    }

    /// Check the identity is usable
    ///
    /// An empty published name would make every resolution ambiguous, so the
    /// agent refuses to start rather than resolve incorrectly at request time.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(AgentError::InvalidIdentity("name is empty"));
        }
        Ok(())
    }
}

/// Agent configuration options
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    /// Published identity
    pub identity: AgentIdentity,

    /// Delay before re-establishing a lost control connection
    /// (zero = use the supervisor default)
    pub reconnect_timeout: Duration,
}

impl AgentConfig {
    /// Create a config for the given published name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: AgentIdentity::new(name),
            reconnect_timeout: Duration::ZERO,
        }
    }

    /// Set the identity
    pub fn identity(mut self, identity: AgentIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Set the reconnect timeout
    pub fn reconnect_timeout(mut self, timeout: Duration) -> Self {
        self.reconnect_timeout = timeout;
        self
    }
}
