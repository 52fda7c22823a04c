//! Source registry implementation
//!
//! The registry is assembled once through [`SourceRegistryBuilder`] while the
//! configuration loader runs, then frozen. All later access is read-only, so
//! no interior locking is needed even when sessions share it across tasks.

use std::collections::HashMap;

use super::source::SourceDefinition;

/// Reserved key for the agent's default source
pub(crate) const DEFAULT_SOURCE_KEY: &str = "";

/// Immutable name → source mapping shared by all sessions
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: HashMap<String, SourceDefinition>,
}

impl SourceRegistry {
    /// Start building a registry
    pub fn builder() -> SourceRegistryBuilder {
        SourceRegistryBuilder::default()
    }

    /// Look up a source by its registered (escaped) stream name
    pub fn get(&self, name: &str) -> Option<&SourceDefinition> {
        self.sources.get(name)
    }

    /// The default source, registered under the reserved empty key
    pub fn default_source(&self) -> Option<&SourceDefinition> {
        self.sources.get(DEFAULT_SOURCE_KEY)
    }

    /// Registered stream names, sorted
    ///
    /// The default source appears as the empty name.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over all entries, unordered
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceDefinition)> {
        self.sources.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the registry has no sources
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Builder used by the configuration loader to assemble the registry
///
/// Duplicate names are resolved last-write-wins, matching how repeated
/// config entries override earlier ones.
#[derive(Debug, Default)]
pub struct SourceRegistryBuilder {
    sources: HashMap<String, SourceDefinition>,
}

impl SourceRegistryBuilder {
    /// Register a source under a stream name
    pub fn source(mut self, name: impl Into<String>, definition: SourceDefinition) -> Self {
        let name = name.into();
        if self.sources.insert(name.clone(), definition).is_some() {
            tracing::warn!(name = %name, "Duplicate source name, previous entry replaced");
        }
        self
    }

    /// Register the default source (reserved empty key)
    pub fn default_source(self, definition: SourceDefinition) -> Self {
        self.source(DEFAULT_SOURCE_KEY, definition)
    }

    /// Freeze the registry
    pub fn build(self) -> SourceRegistry {
        SourceRegistry {
            sources: self.sources,
        }
    }
}
