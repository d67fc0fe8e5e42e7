//! `rota-sessions` — in-memory admin session tokens with TTL eviction.
//!
//! Login issues an opaque token; every mutating route presents it back.
//! Entries expire after a configurable TTL and are dropped lazily on
//! validation plus swept periodically, so the map never grows without bound.

pub mod store;
pub mod types;

pub use store::SessionStore;
pub use types::SessionEntry;
