//! Middleware module
//!
//! Cross-cutting access control applied in front of every gated view

pub mod auth;

pub use auth::{has_capability, require_capability, resolve_route, Capability, Route, RouteDecision};
