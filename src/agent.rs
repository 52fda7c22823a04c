//! Agent wiring
//!
//! Assembles the shared pieces (configuration, registry, cache, peer
//! factory) into the two objects the external control-channel client needs:
//! the session binder it calls per accepted session, and the supervision
//! loop that turns its disconnect notifications into scheduled reconnects.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AgentConfig;
use crate::error::Result;
use crate::peer::PeerFactory;
use crate::registry::SourceRegistry;
use crate::session::{SessionBinder, SessionCache};
use crate::supervisor::{ControlChannel, ReconnectSupervisor};

/// The restreaming agent's routing and reconnection core
pub struct Agent {
    config: Arc<AgentConfig>,
    registry: Arc<SourceRegistry>,
    binder: SessionBinder,
    supervisor: ReconnectSupervisor,
}

impl Agent {
    /// Build the agent from loaded configuration
    ///
    /// Fails fast on an unusable identity instead of resolving incorrectly
    /// at request time. An empty registry is accepted (the loader reports
    /// it); every resolution will simply fail.
    pub fn new(config: AgentConfig, registry: SourceRegistry) -> Result<Self> {
        config.identity.validate()?;

        if registry.is_empty() {
            tracing::warn!("No sources registered, every resolution will fail");
        }

        let config = Arc::new(config);
        let registry = Arc::new(registry);
        let binder = SessionBinder::new(
            config.clone(),
            registry.clone(),
            Arc::new(SessionCache::new()),
            PeerFactory::new(),
        );
        let supervisor = ReconnectSupervisor::new(config.reconnect_timeout);

        Ok(Self {
            config,
            registry,
            binder,
            supervisor,
        })
    }

    /// The configuration the agent was built from
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The source registry shared with every session
    pub fn registry(&self) -> &Arc<SourceRegistry> {
        &self.registry
    }

    /// The session factory to hand to the control-channel client
    pub fn binder(&self) -> &SessionBinder {
        &self.binder
    }

    /// The reconnection supervisor
    pub fn supervisor(&self) -> &ReconnectSupervisor {
        &self.supervisor
    }

    /// Drive the reconnection supervision loop
    ///
    /// Schedules one reconnect per notification received on `disconnects`.
    /// Returns when the control-channel client drops its notification
    /// sender; connection loss itself is never fatal.
    pub async fn run(
        &self,
        channel: Arc<dyn ControlChannel>,
        mut disconnects: mpsc::Receiver<()>,
    ) -> Result<()> {
        while disconnects.recv().await.is_some() {
            tracing::warn!("Control channel disconnected");
            self.supervisor.on_disconnect(channel.clone());
        }

        tracing::info!("Control channel gone, supervision loop finished");
        Ok(())
    }
}
