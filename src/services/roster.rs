//! Roster aggregation and manager vote override
//!
//! Managers see a match's votes partitioned by status and may force-write
//! any member's record. Overrides intentionally skip the voting-window
//! guard, e.g. to correct a no-show after the match.

use tracing::{info, warn};

use crate::models::matches::Match;
use crate::models::participation::{OverrideVoteRequest, Participation, ParticipationStatus};
use crate::services::backend::BackendClient;
use crate::utils::errors::Result;

/// A match's participations grouped by vote status
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub attending: Vec<Participation>,
    pub absent: Vec<Participation>,
    pub pending: Vec<Participation>,
}

/// Per-status tallies for list rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterCounts {
    pub attending: usize,
    pub absent: usize,
    pub pending: usize,
}

impl Roster {
    pub fn counts(&self) -> RosterCounts {
        RosterCounts {
            attending: self.attending.len(),
            absent: self.absent.len(),
            pending: self.pending.len(),
        }
    }

    /// Number of recognized entries across all three buckets
    pub fn total(&self) -> usize {
        self.attending.len() + self.absent.len() + self.pending.len()
    }

    /// Replace one member's entry with the canonical record, moving it to
    /// the bucket its status belongs in
    pub fn replace(&mut self, participation: Participation) {
        let member_id = participation.member_id;
        self.attending.retain(|p| p.member_id != member_id);
        self.absent.retain(|p| p.member_id != member_id);
        self.pending.retain(|p| p.member_id != member_id);

        match participation.status {
            ParticipationStatus::Attending => self.attending.push(participation),
            ParticipationStatus::Absent => self.absent.push(participation),
            ParticipationStatus::Pending => self.pending.push(participation),
            ParticipationStatus::Unknown => {
                warn!(member_id = member_id, "Dropping roster entry with unrecognized status");
            }
        }
    }
}

/// Partition participations by vote status.
///
/// Entries with a status this client does not recognize are dropped from
/// the partitions and logged; a bad row must never take down the view.
pub fn aggregate_roster(participations: &[Participation]) -> Roster {
    let mut roster = Roster::default();

    for participation in participations {
        match participation.status {
            ParticipationStatus::Attending => roster.attending.push(participation.clone()),
            ParticipationStatus::Absent => roster.absent.push(participation.clone()),
            ParticipationStatus::Pending => roster.pending.push(participation.clone()),
            ParticipationStatus::Unknown => {
                warn!(
                    participation_id = participation.id,
                    match_id = participation.match_id,
                    member_id = participation.member_id,
                    "Dropping participation with unrecognized status"
                );
            }
        }
    }

    roster
}

fn display_name(participation: &Participation) -> String {
    participation
        .member
        .as_ref()
        .map(|m| m.name.clone())
        .unwrap_or_else(|| format!("회원 {}", participation.member_id))
}

/// Shareable attendance summary, attending bucket only
pub fn attendee_summary(game: &Match, roster: &Roster) -> String {
    let attending_list = roster
        .attending
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {}", i + 1, display_name(p)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "[{}] 참석 현황\n\n✅ 참석 ({}명)\n{}\n\n📍 장소: {}",
        game.name,
        roster.attending.len(),
        attending_list,
        game.location
    )
}

/// Manager-side roster operations
#[derive(Clone)]
pub struct RosterService {
    backend: BackendClient,
}

impl RosterService {
    /// Create a new RosterService instance
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Group a match's embedded participations by status
    pub fn roster_for(&self, game: &Match) -> Roster {
        aggregate_roster(&game.participations)
    }

    /// Force-write a member's vote, bypassing every voting-window guard.
    /// Returns the canonical record; the caller replaces the roster entry.
    pub async fn override_vote(&self, request: OverrideVoteRequest) -> Result<Participation> {
        let participation = self.backend.admin_override_vote(&request).await?;

        info!(
            match_id = request.match_id,
            member_id = request.member_id,
            status = request.status.as_str(),
            "Vote overridden by manager"
        );

        Ok(participation)
    }
}
