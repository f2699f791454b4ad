//! Voting window evaluation and vote submission
//!
//! The three match deadlines (polling start, soft deadline, hard deadline)
//! derive a display state and a voting permission flag from the current
//! time. The client-side guards here are a courtesy: the backend enforces
//! the same window independently and its response is always canonical.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::matches::{Match, MatchStatus};
use crate::models::participation::{Participation, ParticipationStatus, VoteRequest};
use crate::services::backend::BackendClient;
use crate::state::votes::VoteBoard;
use crate::utils::errors::{MatchBuddyError, Result};
use crate::utils::time::format_long;

/// Voting window phase for a match at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotePhase {
    NotYetOpen,
    Open,
    Closed,
}

impl VotePhase {
    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            VotePhase::NotYetOpen => "투표 예정",
            VotePhase::Open => "투표 진행중",
            VotePhase::Closed => "투표 마감",
        }
    }
}

/// Result of evaluating a match's voting window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchWindow {
    pub phase: VotePhase,
    pub can_vote: bool,
    pub reason: Option<String>,
}

/// Derive the voting window for `game` at `now`.
///
/// Pure and cheap; call it on every render or poll rather than caching, as
/// `now` is the only input that changes. Boundary instants count as open:
/// the window closes strictly after `hard_deadline_at`. A missing deadline
/// skips its check, matching the backend's own guard.
pub fn evaluate_match_status(game: &Match, now: DateTime<Utc>) -> MatchWindow {
    if let Some(opens_at) = game.polling_start_at {
        if now < opens_at {
            return MatchWindow {
                phase: VotePhase::NotYetOpen,
                can_vote: false,
                reason: Some(format!("투표는 {} 부터 가능합니다.", format_long(opens_at))),
            };
        }
    }

    if let Some(closes_at) = game.hard_deadline_at {
        if now > closes_at {
            return MatchWindow {
                phase: VotePhase::Closed,
                can_vote: false,
                reason: Some("투표가 마감되었습니다.".to_string()),
            };
        }
    }

    MatchWindow {
        phase: VotePhase::Open,
        can_vote: true,
        reason: None,
    }
}

/// Display label for manager lists: terminal lifecycle states win over the
/// time-derived window
pub fn display_label(game: &Match, now: DateTime<Utc>) -> &'static str {
    match game.status {
        MatchStatus::Cancelled | MatchStatus::Finished | MatchStatus::Closed => game.status.label(),
        MatchStatus::Recruiting => evaluate_match_status(game, now).phase.label(),
    }
}

/// Vote submission service for the current member
#[derive(Clone)]
pub struct VotingService {
    backend: BackendClient,
    board: Arc<Mutex<VoteBoard>>,
    in_flight: Arc<Mutex<HashSet<i64>>>,
}

impl VotingService {
    /// Create a new VotingService instance
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            board: Arc::new(Mutex::new(VoteBoard::new())),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Local voting-window preconditions. Failing any of them means no
    /// network request is made at all.
    pub fn check_preconditions(
        game: &Match,
        status: ParticipationStatus,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(closes_at) = game.hard_deadline_at {
            if now > closes_at {
                return Err(MatchBuddyError::VotingClosed { match_id: game.id });
            }
        }

        if status == ParticipationStatus::Pending {
            if let Some(soft_deadline) = game.soft_deadline_at {
                if now > soft_deadline {
                    return Err(MatchBuddyError::UndecidedNotAllowed { match_id: game.id });
                }
            }
        }

        Ok(())
    }

    /// Record or change the current member's vote on `game`.
    ///
    /// The backend's canonical participation replaces the local entry for
    /// this match; every other entry is untouched. A second submission for
    /// the same match while one is outstanding is refused locally.
    pub async fn submit_vote(
        &self,
        game: &Match,
        status: ParticipationStatus,
        comment: Option<String>,
    ) -> Result<Participation> {
        Self::check_preconditions(game, status, Utc::now())?;

        {
            let mut in_flight = self.in_flight.lock().await;
            if !in_flight.insert(game.id) {
                warn!(match_id = game.id, "Duplicate vote submission suppressed");
                return Err(MatchBuddyError::SubmissionInFlight { match_id: game.id });
            }
        }

        let request = VoteRequest { status, comment };
        let result = self.backend.vote(game.id, &request).await;

        self.in_flight.lock().await.remove(&game.id);

        match result {
            Ok(participation) => {
                info!(
                    match_id = game.id,
                    member_id = participation.member_id,
                    status = status.as_str(),
                    "Vote recorded"
                );
                self.board.lock().await.apply(participation.clone());
                Ok(participation)
            }
            Err(e) => {
                // Local state stays as it was; the user may retry manually
                warn!(match_id = game.id, error = %e, "Vote submission failed");
                Err(e)
            }
        }
    }

    /// Fetch the member's participations and replace the vote board
    pub async fn load_my_votes(&self) -> Result<()> {
        let participations = self.backend.get_my_participations().await?;
        debug!(count = participations.len(), "Loaded my participations");
        self.board.lock().await.load(participations);
        Ok(())
    }

    /// Install an already-fetched participation list (dashboard join path)
    pub async fn install_votes(&self, participations: Vec<Participation>) {
        self.board.lock().await.load(participations);
    }

    /// The member's current vote for a match, if any
    pub async fn my_vote(&self, match_id: i64) -> Option<Participation> {
        self.board.lock().await.get(match_id).cloned()
    }

    /// Snapshot of the whole vote board
    pub async fn board_snapshot(&self) -> VoteBoard {
        self.board.lock().await.clone()
    }

    /// Drop all local vote state (logout)
    pub async fn clear(&self) {
        self.board.lock().await.clear();
    }
}
