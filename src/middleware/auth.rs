//! Route guard and capability checks
//!
//! Every gated view goes through the same two functions: `resolve_route`
//! turns the current session state into an allow/redirect decision, and
//! `has_capability` centralizes the role tests so no view does its own
//! string matching. Both are advisory, the backend independently authorizes
//! every privileged write.

use tracing::debug;

use crate::models::member::Member;
use crate::services::session::SessionState;
use crate::utils::errors::{MatchBuddyError, Result};

/// Things a member may be allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewDashboard,
    CastVote,
    ManageMatches,
    OverrideVotes,
    ManageMembers,
    SendNotifications,
}

const MANAGER_ROLES: &[&str] = &["ADMIN", "MANAGER"];

/// Check whether `member` holds `capability`
pub fn has_capability(member: &Member, capability: Capability) -> bool {
    if !member.is_active() {
        return false;
    }

    match capability {
        Capability::ViewDashboard | Capability::CastVote => true,
        Capability::ManageMatches
        | Capability::OverrideVotes
        | Capability::ManageMembers
        | Capability::SendNotifications => {
            MANAGER_ROLES.iter().any(|role| member.has_role(role))
        }
    }
}

/// Require a capability or fail with a user-visible denial
pub fn require_capability(member: &Member, capability: Capability) -> Result<()> {
    if has_capability(member, capability) {
        Ok(())
    } else {
        Err(MatchBuddyError::PermissionDenied(
            "관리자 권한이 없습니다.".to_string(),
        ))
    }
}

/// Application routes guarded by session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login entry point
    Login,
    /// Waiting room for unapproved members
    Pending,
    Dashboard,
    Settings,
    /// Manager console, role-gated on top of the session guard
    Manager,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Login => "login",
            Route::Pending => "pending",
            Route::Dashboard => "dashboard",
            Route::Settings => "settings",
            Route::Manager => "manager",
        }
    }
}

/// Outcome of a guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect {
        to: Route,
        notice: Option<String>,
    },
    /// Session still resolving; render nothing yet
    Wait,
}

/// Evaluate the route guard for the current session state.
///
/// Call this again whenever the session state changes: a member approved
/// mid-session flips from the waiting room to the dashboard without a fresh
/// login, because the decision is derived from the live state every time.
pub fn resolve_route(state: &SessionState, requested: Route) -> RouteDecision {
    let decision = match state {
        SessionState::Unresolved | SessionState::Checking => RouteDecision::Wait,

        SessionState::Anonymous => {
            if requested == Route::Login {
                RouteDecision::Allow
            } else {
                RouteDecision::Redirect {
                    to: Route::Login,
                    notice: None,
                }
            }
        }

        SessionState::Authenticated(member) => {
            if !member.is_active() {
                // PENDING and REJECTED members are confined to the waiting room
                if requested == Route::Pending {
                    RouteDecision::Allow
                } else {
                    RouteDecision::Redirect {
                        to: Route::Pending,
                        notice: None,
                    }
                }
            } else {
                match requested {
                    // An approved member has no business on these pages
                    Route::Login | Route::Pending => RouteDecision::Redirect {
                        to: Route::Dashboard,
                        notice: None,
                    },
                    Route::Manager => {
                        if has_capability(member, Capability::ManageMatches) {
                            RouteDecision::Allow
                        } else {
                            RouteDecision::Redirect {
                                to: Route::Dashboard,
                                notice: Some("관리자 권한이 없습니다.".to_string()),
                            }
                        }
                    }
                    Route::Dashboard | Route::Settings => RouteDecision::Allow,
                }
            }
        }
    };

    debug!(
        route = requested.as_str(),
        decision = ?decision,
        "Route guard evaluated"
    );
    decision
}
