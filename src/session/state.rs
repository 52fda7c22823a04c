//! Session state machine
//!
//! Tracks a signalling session from creation to teardown. Transitions are
//! guarded: a transition requested from the wrong phase is ignored, and
//! `Closed` is terminal.

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Created, control channel not yet reported connected
    #[default]
    Unbound,
    /// Ready to serve requests; no peer bound yet
    Connected,
    /// A target resolved and the session owns its peer
    TargetResolved,
    /// Torn down; terminal
    Closed,
}

impl SessionPhase {
    /// Transition on the on-connected event
    pub fn connect(&mut self) {
        if *self == SessionPhase::Unbound {
            *self = SessionPhase::Connected;
        }
    }

    /// Transition on the single successful target resolution
    pub fn target_resolved(&mut self) {
        if *self == SessionPhase::Connected {
            *self = SessionPhase::TargetResolved;
        }
    }

    /// Transition on teardown
    pub fn close(&mut self) {
        *self = SessionPhase::Closed;
    }

    /// Whether the session may serve requests
    pub fn is_active(&self) -> bool {
        matches!(self, SessionPhase::Connected | SessionPhase::TargetResolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut phase = SessionPhase::default();
        assert_eq!(phase, SessionPhase::Unbound);
        assert!(!phase.is_active());

        phase.connect();
        assert_eq!(phase, SessionPhase::Connected);
        assert!(phase.is_active());

        phase.target_resolved();
        assert_eq!(phase, SessionPhase::TargetResolved);
        assert!(phase.is_active());

        phase.close();
        assert_eq!(phase, SessionPhase::Closed);
        assert!(!phase.is_active());
    }

    #[test]
    fn test_closed_is_terminal() {
        let mut phase = SessionPhase::Closed;
        phase.connect();
        assert_eq!(phase, SessionPhase::Closed);
        phase.target_resolved();
        assert_eq!(phase, SessionPhase::Closed);
    }

    #[test]
    fn test_resolution_requires_connected() {
        let mut phase = SessionPhase::Unbound;
        phase.target_resolved();
        assert_eq!(phase, SessionPhase::Unbound);
    }
}
