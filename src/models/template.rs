//! Match template model
//!
//! A recurring-schedule blueprint. Templates are immutable once created and
//! exist only to stamp out concrete matches; the deadline offsets are hours
//! before kickoff.

use serde::{Deserialize, Serialize};

use crate::utils::errors::Result;
use crate::utils::time::format_weekly_schedule;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchTemplate {
    pub id: i64,
    pub club_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    /// Time of day in UTC, `HH:MM:SS`
    pub start_time: String,
    pub duration_minutes: i64,
    pub location: String,
    pub polling_start_hours_before: i64,
    pub soft_deadline_hours_before: i64,
    pub hard_deadline_hours_before: i64,
    pub min_participants: i64,
    pub max_participants: i64,
}

impl MatchTemplate {
    /// Human-readable weekly schedule line, e.g. `매주 화요일 20:00`
    pub fn schedule_line(&self) -> Result<String> {
        format_weekly_schedule(self.day_of_week, &self.start_time)
    }
}

/// Template creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub club_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub day_of_week: u8,
    pub start_time: String,
    pub duration_minutes: i64,
    pub location: String,
    pub polling_start_hours_before: i64,
    pub soft_deadline_hours_before: i64,
    pub hard_deadline_hours_before: i64,
    pub min_participants: i64,
    pub max_participants: i64,
}
