//! Agent error types

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, AgentError>;

/// Error type for agent operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// Requested URI does not resolve to any configured source
    UnknownTarget(String),
    /// Session already owns a peer; a second target-establishing request arrived
    PeerAlreadyBound,
    /// Agent identity is unusable (empty published name)
    InvalidIdentity(&'static str),
    /// Outward request/response sink was closed by the control channel
    SinkClosed,
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentError::UnknownTarget(uri) => write!(f, "Unknown target: {}", uri),
            AgentError::PeerAlreadyBound => write!(f, "Session already owns a streaming peer"),
            AgentError::InvalidIdentity(reason) => write!(f, "Invalid agent identity: {}", reason),
            AgentError::SinkClosed => write!(f, "Control channel sink closed"),
        }
    }
}

impl std::error::Error for AgentError {}
