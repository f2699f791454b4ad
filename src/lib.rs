//! MatchBuddy
//!
//! Club football match scheduling and attendance voting client.
//! This library provides the application core behind the club's match
//! views: session bootstrap against the club backend, voting-window
//! evaluation, vote submission, roster management and notifications.

#![allow(non_snake_case)]

pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{MatchBuddyError, Result};

// Re-export main components for easy access
pub use middleware::{Capability, Route, RouteDecision};
pub use services::{ServiceFactory, SessionState};
pub use state::{CredentialStore, VoteBoard};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
