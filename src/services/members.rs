//! Member service implementation
//!
//! Self-service profile updates with field validation, and the manager-side
//! approval/role flow. The backend is the authority on every write; this
//! service validates input shape before putting it on the wire.

use tracing::{debug, info, warn};

use crate::models::member::{Member, MemberAdminUpdate, MemberProfileUpdate, MemberStatus};
use crate::services::backend::BackendClient;
use crate::utils::errors::{MatchBuddyError, Result};
use crate::utils::helpers::{is_valid_phone, is_valid_position};

/// Role tags the backend understands
pub const KNOWN_ROLES: &[&str] = &["ADMIN", "MANAGER", "VIEWER"];

const BIRTH_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1940..=2020;
const BACK_NUMBER_RANGE: std::ops::RangeInclusive<i32> = 0..=99;

/// Member profile and approval operations
#[derive(Clone)]
pub struct MemberService {
    backend: BackendClient,
}

impl MemberService {
    /// Create a new MemberService instance
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Validate a profile patch before it goes on the wire
    pub fn validate_profile(patch: &MemberProfileUpdate) -> Result<()> {
        if let Some(phone) = patch.phone.as_deref() {
            if !is_valid_phone(phone) {
                return Err(MatchBuddyError::InvalidInput(format!(
                    "전화번호 형식이 올바르지 않습니다: {phone}"
                )));
            }
        }

        if let Some(birth_year) = patch.birth_year {
            if !BIRTH_YEAR_RANGE.contains(&birth_year) {
                return Err(MatchBuddyError::InvalidInput(format!(
                    "출생 연도가 범위를 벗어났습니다: {birth_year}"
                )));
            }
        }

        if let Some(back_number) = patch.back_number {
            if !BACK_NUMBER_RANGE.contains(&back_number) {
                return Err(MatchBuddyError::InvalidInput(format!(
                    "등번호는 0-99 사이여야 합니다: {back_number}"
                )));
            }
        }

        if let Some(positions) = patch.positions.as_deref() {
            for position in positions {
                if !is_valid_position(position) {
                    return Err(MatchBuddyError::InvalidInput(format!(
                        "알 수 없는 포지션입니다: {position}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Update the current member's profile; returns the canonical record
    pub async fn update_my_profile(&self, patch: MemberProfileUpdate) -> Result<Member> {
        Self::validate_profile(&patch)?;

        let member = self.backend.update_my_profile(&patch).await?;
        info!(member_id = member.id, "Profile updated");
        Ok(member)
    }

    /// All members of the club (manager view)
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        let members = self.backend.list_members().await?;
        debug!(count = members.len(), "Member list loaded");
        Ok(members)
    }

    /// Set a member's approval status
    pub async fn set_member_status(&self, member_id: i64, status: MemberStatus) -> Result<Member> {
        let patch = MemberAdminUpdate {
            status: Some(status),
            ..Default::default()
        };

        let member = self.backend.update_member(member_id, &patch).await?;
        info!(member_id = member_id, status = ?status, "Member status changed");
        Ok(member)
    }

    /// Approve a pending member
    pub async fn approve_member(&self, member_id: i64) -> Result<Member> {
        self.set_member_status(member_id, MemberStatus::Active).await
    }

    /// Reject a member (terminal)
    pub async fn reject_member(&self, member_id: i64) -> Result<Member> {
        self.set_member_status(member_id, MemberStatus::Rejected).await
    }

    /// Replace a member's role tags
    pub async fn set_member_roles(&self, member_id: i64, roles: Vec<String>) -> Result<Member> {
        for role in &roles {
            if !KNOWN_ROLES.contains(&role.as_str()) {
                warn!(member_id = member_id, role = %role, "Rejecting unknown role tag");
                return Err(MatchBuddyError::InvalidInput(format!(
                    "알 수 없는 역할입니다: {role}"
                )));
            }
        }

        let patch = MemberAdminUpdate {
            roles: Some(roles),
            ..Default::default()
        };

        let member = self.backend.update_member(member_id, &patch).await?;
        info!(member_id = member_id, roles = ?member.roles, "Member roles changed");
        Ok(member)
    }
}
