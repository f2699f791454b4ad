//! Participation model
//!
//! One member's vote on one match. The backend keeps a single row per
//! (match, member) pair and upserts on revote.

use serde::{Deserialize, Serialize};

/// Vote status. PENDING here means "undecided", distinct from a member's
/// PENDING approval status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    Attending,
    Absent,
    Pending,
    /// Anything the backend sends that this client does not recognize.
    /// Kept so a single bad row cannot take down a roster view.
    #[serde(other)]
    Unknown,
}

impl ParticipationStatus {
    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            ParticipationStatus::Attending => "참석",
            ParticipationStatus::Absent => "불참",
            ParticipationStatus::Pending => "미정",
            ParticipationStatus::Unknown => "?",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationStatus::Attending => "ATTENDING",
            ParticipationStatus::Absent => "ABSENT",
            ParticipationStatus::Pending => "PENDING",
            ParticipationStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for ParticipationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ATTENDING" => Ok(ParticipationStatus::Attending),
            "ABSENT" => Ok(ParticipationStatus::Absent),
            "PENDING" => Ok(ParticipationStatus::Pending),
            other => Err(format!("unknown participation status: {other}")),
        }
    }
}

/// Embedded member data carried inside roster rows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberSummary {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participation {
    pub id: i64,
    pub match_id: i64,
    pub member_id: i64,
    pub status: ParticipationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberSummary>,
}

/// Vote upsert request body; the backend resolves the member from the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub status: ParticipationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Manager override request, bypassing the voting-window guard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideVoteRequest {
    pub match_id: i64,
    pub member_id: i64,
    pub status: ParticipationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_deserializes() {
        let json = r#"{"id": 1, "match_id": 2, "member_id": 3, "status": "GHOSTED"}"#;
        let participation: Participation = serde_json::from_str(json).unwrap();
        assert_eq!(participation.status, ParticipationStatus::Unknown);
    }

    #[test]
    fn test_status_round_trip() {
        let json = r#""ATTENDING""#;
        let status: ParticipationStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status, ParticipationStatus::Attending);
        assert_eq!(serde_json::to_string(&status).unwrap(), json);
    }

    #[test]
    fn test_status_from_str() {
        use std::str::FromStr;
        assert_eq!(
            ParticipationStatus::from_str("attending").unwrap(),
            ParticipationStatus::Attending
        );
        assert!(ParticipationStatus::from_str("maybe").is_err());
    }
}
