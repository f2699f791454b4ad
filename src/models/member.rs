//! Member model

use serde::{Deserialize, Serialize};

/// Account approval state. Only ACTIVE members reach voting screens;
/// PENDING members wait for manager approval, REJECTED is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Pending,
    Active,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: i64,
    pub kakao_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<String>>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub status: MemberStatus,
}

impl Member {
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Kakao login payload sent to the backend token exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoLoginPayload {
    pub kakao_id: String,
    pub name: String,
    pub email: String,
}

/// Session token issued by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// First-login registration request. New accounts start as PENDING viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterMemberRequest {
    pub kakao_id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    pub roles: Vec<String>,
    pub status: MemberStatus,
}

impl RegisterMemberRequest {
    pub fn new(kakao_id: String, name: String, email: String, picture_url: Option<String>) -> Self {
        Self {
            kakao_id,
            name,
            email,
            picture_url,
            roles: vec!["VIEWER".to_string()],
            status: MemberStatus::Pending,
        }
    }
}

/// Self-service profile update (PATCH, partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

/// Manager-side member update (approval, rejection, role assignment)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberAdminUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MemberStatus>,
}
