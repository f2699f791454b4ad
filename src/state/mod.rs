//! Client-side state management
//!
//! Credential persistence and per-view vote state

pub mod store;
pub mod votes;

pub use store::{CredentialStore, MemoryCredentialStore, RedisCredentialStore};
pub use votes::VoteBoard;
