//! Match model
//!
//! A single scheduled event. All instants on the wire are UTC; deadline
//! fields go through lenient parsing so one malformed timestamp degrades to
//! "no data" instead of rejecting the whole payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::participation::Participation;
use crate::utils::time::{deserialize_lenient_utc, deserialize_lenient_utc_opt};

/// Backend lifecycle status, distinct from the time-derived voting window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Recruiting,
    Closed,
    Cancelled,
    Finished,
}

impl MatchStatus {
    /// Korean display label for list views
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Recruiting => "모집중",
            MatchStatus::Closed => "마감",
            MatchStatus::Cancelled => "취소됨",
            MatchStatus::Finished => "종료",
        }
    }
}

fn default_duration_minutes() -> i64 {
    120
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub club_id: i64,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: MatchStatus,

    #[serde(deserialize_with = "deserialize_lenient_utc")]
    pub start_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_lenient_utc_opt")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i64,

    #[serde(default, deserialize_with = "deserialize_lenient_utc_opt")]
    pub polling_start_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_utc_opt")]
    pub soft_deadline_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_utc_opt")]
    pub hard_deadline_at: Option<DateTime<Utc>>,

    pub min_participants: i64,
    pub max_participants: i64,

    /// Embedded votes, present on manager list responses
    #[serde(default)]
    pub participations: Vec<Participation>,
}

/// Manual match creation request. Deadlines are optional; missing ones are
/// defaulted before submission (see `services::matches`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualMatchPayload {
    pub club_id: i64,
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polling_start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_deadline_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_deadline_at: Option<DateTime<Utc>>,
    pub min_participants: i64,
    pub max_participants: i64,
}

/// Partial match update (PATCH); only set fields go on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polling_start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_deadline_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_deadline_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_participants: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<i64>,
}

/// Request to stamp a match out of a template for a concrete date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateMatchRequest {
    pub template_id: i64,
    /// `YYYY-MM-DD`
    pub match_date: String,
}
