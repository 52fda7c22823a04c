//! Source registry
//!
//! The registry maps logical stream names to source definitions. It is built
//! once at startup from loaded configuration and never mutated afterwards;
//! every session holds it behind an `Arc` and only reads from it.
//!
//! # Architecture
//!
//! ```text
//!                    Arc<SourceRegistry>
//!               ┌──────────────────────────┐
//!               │ sources: HashMap<String, │
//!               │   SourceDefinition {     │
//!               │     kind,                │
//!               │     locator,             │
//!               │     description,         │
//!               │   }                      │
//!               │ >                        │
//!               └────────────┬─────────────┘
//!                            │  read-only
//!          ┌─────────────────┼─────────────────┐
//!          ▼                 ▼                 ▼
//!     [Session]         [Session]         [Session]
//!     resolve()         list query        resolve()
//! ```
//!
//! The empty-string key is reserved for the agent's *default* source, the one
//! selected when a request addresses the agent's published name itself with
//! no sub-path.

pub mod source;
pub mod store;

pub use source::{SourceDefinition, SourceKind};
pub use store::{SourceRegistry, SourceRegistryBuilder};
