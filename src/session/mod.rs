//! Session lifecycle
//!
//! Everything a logical signalling session owns and shares:
//!
//! - [`Session`] — per-conversation state: phase, at most one streaming
//!   peer, and the pending correlation tokens for outward requests
//! - [`SessionBinder`] — the factory the control-channel client uses to
//!   create sessions wired to the agent's shared state
//! - [`SessionCache`] — process-lifetime cache of serialized answers to
//!   registry-derived queries, shared across all sessions
//! - [`SessionPhase`] — the lifecycle state machine

pub mod binder;
pub mod cache;
pub mod session;
pub mod state;

pub use binder::SessionBinder;
pub use cache::SessionCache;
pub use session::Session;
pub use state::SessionPhase;
