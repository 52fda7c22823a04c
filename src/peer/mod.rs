//! Streaming peers
//!
//! A peer is the concrete endpoint a session owns once its target resolves
//! to a source. Each [`SourceKind`] maps to exactly one peer type wrapping a
//! distinct external media backend; the actual media setup (pipelines, ICE,
//! transport) lives in those backends, not here. Construction is
//! non-blocking: a peer only captures its locator, and any heavy setup is
//! deferred to the backend's own lifecycle.

use crate::registry::{SourceDefinition, SourceKind};

/// Handle to a concrete streaming endpoint
///
/// Owned exclusively by the session that created it; dropped on session
/// teardown, which releases the underlying backend.
pub trait StreamingPeer: Send {
    /// Which source kind this peer serves
    fn kind(&self) -> SourceKind;

    /// The backend locator this peer was constructed from
    fn locator(&self) -> &str;
}

/// Peer serving a generated test pattern
#[derive(Debug)]
pub struct TestPeer {
    locator: String,
}

impl TestPeer {
    /// Create a test peer for the given pattern locator
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
        }
    }
}

impl StreamingPeer for TestPeer {
    fn kind(&self) -> SourceKind {
        SourceKind::Test
    }

    fn locator(&self) -> &str {
        &self.locator
    }
}

/// Peer relaying an upstream stream
#[derive(Debug)]
pub struct RelayPeer {
    locator: String,
}

impl RelayPeer {
    /// Create a relay peer for the given upstream locator
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
        }
    }
}

impl StreamingPeer for RelayPeer {
    fn kind(&self) -> SourceKind {
        SourceKind::Relay
    }

    fn locator(&self) -> &str {
        &self.locator
    }
}

/// Builds peers from resolved source definitions
///
/// Dispatch is total over the closed `SourceKind` set. `None` is reserved
/// for a backend refusing construction; callers treat it exactly like a
/// failed resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeerFactory;

impl PeerFactory {
    /// Create the factory
    pub fn new() -> Self {
        Self
    }

    /// Construct a peer for a resolved source
    pub fn create_peer(&self, source: &SourceDefinition) -> Option<Box<dyn StreamingPeer>> {
        match source.kind {
            SourceKind::Test => Some(Box::new(TestPeer::new(&source.locator))),
            SourceKind::Relay => Some(Box::new(RelayPeer::new(&source.locator))),
        }
    }
}
