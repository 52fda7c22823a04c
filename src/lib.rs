//! Session routing and reconnection core for a media restreaming agent
//!
//! The agent publishes a set of statically configured media sources under a
//! single name and serves them to remote parties over a persistent
//! signalling connection. This crate implements the routing core: mapping
//! request URIs to sources, binding signalling sessions to streaming peers,
//! and keeping the control connection alive across network failures.
//!
//! # Architecture
//!
//! ```text
//!   control-channel client (external)
//!        │  per logical session            │  on connection loss
//!        ▼                                 ▼
//!   [SessionBinder] ──► [Session]     [ReconnectSupervisor]
//!                          │               │ one-shot timer
//!           resolve(uri)   │               ▼
//!        [NameResolver] ◄──┤          channel.reconnect()
//!                          │
//!        [PeerFactory] ◄───┤  on first DESCRIBE
//!              │           │
//!              ▼           ▼
//!        TestPeer /   shared [SessionCache]
//!        RelayPeer    (parameters, list)
//! ```
//!
//! The wire protocol, WebSocket transport, media backends, and
//! configuration-file parsing are external collaborators; this crate only
//! consumes their interfaces (see [`proto`] and
//! [`supervisor::ControlChannel`]).
//!
//! Everything runs on one cooperative tokio loop: no handler blocks, the
//! supervisor suspends only by arming a timer, and the session cache is the
//! sole cross-session mutable state.

pub mod agent;
pub mod config;
pub mod error;
pub mod peer;
pub mod proto;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod supervisor;

pub use agent::Agent;
pub use config::{AgentConfig, AgentIdentity};
pub use error::{AgentError, Result};
pub use peer::{PeerFactory, RelayPeer, StreamingPeer, TestPeer};
pub use registry::{SourceDefinition, SourceKind, SourceRegistry};
pub use resolver::NameResolver;
pub use session::{Session, SessionBinder, SessionCache, SessionPhase};
pub use supervisor::{ControlChannel, ReconnectSupervisor, DEFAULT_RECONNECT_TIMEOUT};
