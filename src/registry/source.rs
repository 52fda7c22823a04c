//! Source definition types

/// Kind of media source backing a registered stream
///
/// Closed set: adding a kind requires adding a `PeerFactory` dispatch branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Generated test pattern
    Test,
    /// Upstream stream relayed through this agent
    Relay,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Test => f.write_str("test"),
            SourceKind::Relay => f.write_str("relay"),
        }
    }
}

/// Description of one addressable media source
///
/// Immutable once placed in the registry. The `locator` is opaque to this
/// core and interpreted only by the backend matching `kind`; `description`
/// is informational and never used for routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDefinition {
    /// Backend selector
    pub kind: SourceKind,

    /// Backend-specific locator (e.g. an upstream address)
    pub locator: String,

    /// Human-readable description
    pub description: String,
}

impl SourceDefinition {
    /// Create a definition with an empty description
    pub fn new(kind: SourceKind, locator: impl Into<String>) -> Self {
        Self {
            kind,
            locator: locator.into(),
            description: String::new(),
        }
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
