//! Reconnection supervisor
//!
//! The control channel is expected to stay up for the process lifetime;
//! when it drops, the supervisor arms a one-shot timer and asks the channel
//! to reconnect once it fires. The delay is fixed (no backoff, no retry
//! cap): every attempt waits the same configured duration, and a later
//! disconnect schedules a brand-new timer. The timer task is spawned on the
//! current runtime, the same loop context that drives the channel, so the
//! reconnect call never touches the channel from a foreign executor.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Reconnect delay used when the configuration leaves the timeout at zero
pub const DEFAULT_RECONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reconnect entry point of the external control-channel client
///
/// `reconnect` must be non-blocking; the client owns its own connection I/O
/// and reports a later failure through another disconnect notification.
pub trait ControlChannel: Send + Sync {
    /// Re-establish the control connection
    fn reconnect(&self);
}

/// Schedules one reconnect attempt per disconnect notification
#[derive(Debug, Clone, Copy)]
pub struct ReconnectSupervisor {
    delay: Duration,
}

impl ReconnectSupervisor {
    /// Create a supervisor from the configured timeout
    ///
    /// A zero timeout selects [`DEFAULT_RECONNECT_TIMEOUT`].
    pub fn new(configured: Duration) -> Self {
        let delay = if configured > Duration::ZERO {
            configured
        } else {
            DEFAULT_RECONNECT_TIMEOUT
        };
        Self { delay }
    }

    /// Effective delay between a disconnect and the reconnect attempt
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// React to a disconnect notification
    ///
    /// Arms a one-shot timer and returns immediately; when it fires, the
    /// channel's reconnect is invoked exactly once and the timer is
    /// discarded. The channel guarantees at most one outstanding disconnect
    /// notification between connects, so pending timers are never coalesced
    /// or cancelled.
    pub fn on_disconnect(&self, channel: Arc<dyn ControlChannel>) -> JoinHandle<()> {
        let delay = self.delay;
        tracing::info!(delay_secs = delay.as_secs(), "Scheduling reconnect");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!("Reconnecting control channel");
            channel.reconnect();
        })
    }
}
