//! Match and template management
//!
//! Manager-side match lifecycle operations plus the dashboard load used by
//! ordinary members. Deadline sanity checks run client-side before any
//! request so a manager gets immediate feedback; the backend validates
//! again on its own.

use chrono::{Duration, NaiveDate};
use futures::try_join;
use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::models::matches::{GenerateMatchRequest, ManualMatchPayload, Match, MatchUpdatePayload};
use crate::models::participation::Participation;
use crate::models::template::{CreateTemplateRequest, MatchTemplate};
use crate::services::backend::BackendClient;
use crate::utils::errors::{MatchBuddyError, Result};

/// Joined dashboard payload: either both fetches succeed or the whole load
/// fails; stale halves are never rendered
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub matches: Vec<Match>,
    pub participations: Vec<Participation>,
}

/// Match and template operations against the club backend
#[derive(Clone)]
pub struct MatchService {
    backend: BackendClient,
    club_id: i64,
}

impl MatchService {
    /// Create a new MatchService instance
    pub fn new(backend: BackendClient, settings: &Settings) -> Self {
        Self {
            backend,
            club_id: settings.club.club_id,
        }
    }

    /// Fetch the match list and the member's votes concurrently
    pub async fn load_dashboard(&self) -> Result<DashboardData> {
        let (matches, participations) = try_join!(
            self.backend.get_upcoming_matches(self.club_id),
            self.backend.get_my_participations()
        )?;

        debug!(
            matches = matches.len(),
            participations = participations.len(),
            "Dashboard data loaded"
        );

        Ok(DashboardData {
            matches,
            participations,
        })
    }

    /// Upcoming matches for the configured club
    pub async fn upcoming(&self) -> Result<Vec<Match>> {
        self.backend.get_upcoming_matches(self.club_id).await
    }

    /// A single match by id, from the upcoming list
    pub async fn find(&self, match_id: i64) -> Result<Match> {
        self.upcoming()
            .await?
            .into_iter()
            .find(|m| m.id == match_id)
            .ok_or(MatchBuddyError::MatchNotFound { match_id })
    }

    /// Saved templates for the configured club
    pub async fn templates(&self) -> Result<Vec<MatchTemplate>> {
        self.backend.get_match_templates(self.club_id).await
    }

    /// A single template by id, from the club's template list
    pub async fn find_template(&self, template_id: i64) -> Result<MatchTemplate> {
        self.templates()
            .await?
            .into_iter()
            .find(|t| t.id == template_id)
            .ok_or(MatchBuddyError::TemplateNotFound { template_id })
    }

    /// Create a new recurring-schedule template
    pub async fn create_template(&self, request: CreateTemplateRequest) -> Result<MatchTemplate> {
        let template = self.backend.create_match_template(&request).await?;
        info!(template_id = template.id, name = %template.name, "Template created");
        Ok(template)
    }

    /// Stamp a match out of a template for a concrete date
    pub async fn generate_from_template(&self, template_id: i64, date: NaiveDate) -> Result<Match> {
        let request = GenerateMatchRequest {
            template_id,
            match_date: date.format("%Y-%m-%d").to_string(),
        };
        let game = self.backend.generate_match(&request).await?;
        info!(match_id = game.id, template_id = template_id, "Match generated from template");
        Ok(game)
    }

    /// Fill in missing deadlines relative to kickoff, the same offsets the
    /// backend would apply: poll −6d, soft −2d, hard −1d
    pub fn with_default_deadlines(mut payload: ManualMatchPayload) -> ManualMatchPayload {
        let start = payload.start_time;
        payload.polling_start_at = payload.polling_start_at.or(Some(start - Duration::days(6)));
        payload.soft_deadline_at = payload.soft_deadline_at.or(Some(start - Duration::days(2)));
        payload.hard_deadline_at = payload.hard_deadline_at.or(Some(start - Duration::days(1)));
        payload
    }

    /// Deadline ordering sanity checks for a manual match
    pub fn validate_manual_payload(payload: &ManualMatchPayload) -> Result<()> {
        let start = payload.start_time;

        if let Some(polling_start) = payload.polling_start_at {
            if polling_start >= start {
                return Err(MatchBuddyError::InvalidInput(
                    "투표 시작은 경기 시간보다 빨라야 합니다.".to_string(),
                ));
            }
        }

        if let Some(hard_deadline) = payload.hard_deadline_at {
            if hard_deadline >= start {
                return Err(MatchBuddyError::InvalidInput(
                    "마감은 경기 시간보다 빨라야 합니다.".to_string(),
                ));
            }

            if let Some(soft_deadline) = payload.soft_deadline_at {
                if soft_deadline >= hard_deadline {
                    return Err(MatchBuddyError::InvalidInput(
                        "독려 알림은 마감보다 빨라야 합니다.".to_string(),
                    ));
                }
            }
        }

        if payload.min_participants > payload.max_participants {
            return Err(MatchBuddyError::InvalidInput(
                "최소 인원이 최대 인원보다 클 수 없습니다.".to_string(),
            ));
        }

        Ok(())
    }

    /// Create a one-off match; missing deadlines are defaulted first
    pub async fn create_manual(&self, payload: ManualMatchPayload) -> Result<Match> {
        let payload = Self::with_default_deadlines(payload);
        Self::validate_manual_payload(&payload)?;

        let game = self.backend.create_manual_match(&payload).await?;
        info!(match_id = game.id, name = %game.name, "Manual match created");
        Ok(game)
    }

    /// Partially update a match (any field, including lifecycle status)
    pub async fn update(&self, match_id: i64, patch: MatchUpdatePayload) -> Result<Match> {
        let game = self.backend.update_match(match_id, &patch).await?;
        info!(match_id = match_id, "Match updated");
        Ok(game)
    }

    /// Hard-delete a match. There is no undo.
    pub async fn delete(&self, match_id: i64) -> Result<()> {
        self.backend.delete_match(match_id).await?;
        info!(match_id = match_id, "Match deleted");
        Ok(())
    }
}
