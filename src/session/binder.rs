//! Session binder
//!
//! Factory handed to the control-channel client. For every logical session
//! the client accepts, it calls [`SessionBinder::bind`] with the sinks the
//! session should emit protocol messages through; the binder wires the new
//! session to the agent's shared state. Binding performs no I/O and never
//! fails; per-request failures are handled inside the bound session.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AgentConfig;
use crate::peer::PeerFactory;
use crate::proto::{Request, Response};
use crate::registry::SourceRegistry;
use crate::resolver::NameResolver;
use crate::session::cache::SessionCache;
use crate::session::session::Session;

/// Builds sessions wired to the agent's shared state
#[derive(Clone)]
pub struct SessionBinder {
    config: Arc<AgentConfig>,
    registry: Arc<SourceRegistry>,
    cache: Arc<SessionCache>,
    factory: PeerFactory,
}

impl SessionBinder {
    /// Create a binder over the agent's shared state
    pub fn new(
        config: Arc<AgentConfig>,
        registry: Arc<SourceRegistry>,
        cache: Arc<SessionCache>,
        factory: PeerFactory,
    ) -> Self {
        Self {
            config,
            registry,
            cache,
            factory,
        }
    }

    /// Bind a new session to the given outward sinks
    pub fn bind(
        &self,
        request_tx: mpsc::Sender<Request>,
        response_tx: mpsc::Sender<Response>,
    ) -> Session {
        let resolver =
            NameResolver::new(self.config.identity.name.as_str(), self.registry.clone());

        Session::new(
            self.config.clone(),
            resolver,
            self.cache.clone(),
            self.factory,
            request_tx,
            response_tx,
        )
    }
}
