//! Name resolution
//!
//! Maps the URI a request addresses to a configured source. Two forms are
//! accepted:
//!
//! - the agent's published name itself, resolving to the default source
//!   (the reserved empty registry key)
//! - `<agent-name>/<stream-name>`, resolving to the registry entry for
//!   `<stream-name>`
//!
//! Anything else fails resolution. A trailing separator with no stream name
//! (`<agent-name>/`) also fails: the sub-path form requires at least one
//! character after the separator.

use std::sync::Arc;

use crate::registry::{SourceDefinition, SourceRegistry};

/// Path separator between the agent name and a stream name
const NAME_SEPARATOR: char = '/';

/// Resolves request URIs against the agent's registry
#[derive(Debug, Clone)]
pub struct NameResolver {
    agent_name: String,
    registry: Arc<SourceRegistry>,
}

impl NameResolver {
    /// Create a resolver for the given published name
    pub fn new(agent_name: impl Into<String>, registry: Arc<SourceRegistry>) -> Self {
        Self {
            agent_name: agent_name.into(),
            registry,
        }
    }

    /// The agent name this resolver matches against
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// The registry this resolver looks names up in
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Resolve a request URI to a source definition
    ///
    /// Returns `None` for any URI outside the agent's namespace or naming an
    /// unregistered stream. The default case is checked first, so a URI equal
    /// to the agent name never falls through to the sub-path form.
    pub fn resolve(&self, uri: &str) -> Option<&SourceDefinition> {
        if uri == self.agent_name {
            return self.registry.default_source();
        }

        if uri.len() > self.agent_name.len() + 1
            && uri.starts_with(&self.agent_name)
            && uri[self.agent_name.len()..].starts_with(NAME_SEPARATOR)
        {
            let stream_name = &uri[self.agent_name.len() + 1..];
            return self.registry.get(stream_name);
        }

        None
    }
}
