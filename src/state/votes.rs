//! Vote board state
//!
//! The current member's votes keyed by match id. Transitions are total:
//! loading replaces the whole board (a full refetch is always safe), and
//! applying a canonical server response replaces exactly one entry, never a
//! partial merge.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::participation::{Participation, ParticipationStatus};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteBoard {
    entries: HashMap<i64, Participation>,
}

impl VoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole board with a fresh participation list
    pub fn load(&mut self, participations: Vec<Participation>) {
        self.entries = participations
            .into_iter()
            .map(|p| (p.match_id, p))
            .collect();
    }

    /// Apply the backend's canonical participation for one match, replacing
    /// any previous entry wholesale. Returns the entry it replaced.
    pub fn apply(&mut self, participation: Participation) -> Option<Participation> {
        self.entries.insert(participation.match_id, participation)
    }

    /// The member's vote for a match, if any
    pub fn get(&self, match_id: i64) -> Option<&Participation> {
        self.entries.get(&match_id)
    }

    /// The member's vote status for a match, if any
    pub fn status_for(&self, match_id: i64) -> Option<ParticipationStatus> {
        self.entries.get(&match_id).map(|p| p.status)
    }

    /// Drop every entry (logout)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(match_id: i64, status: ParticipationStatus, comment: Option<&str>) -> Participation {
        Participation {
            id: match_id * 10,
            match_id,
            member_id: 7,
            status,
            comment: comment.map(|c| c.to_string()),
            member: None,
        }
    }

    #[test]
    fn test_apply_touches_only_one_entry() {
        let mut board = VoteBoard::new();
        board.load(vec![
            vote(1, ParticipationStatus::Pending, None),
            vote(2, ParticipationStatus::Attending, Some("카풀 구해요")),
        ]);

        board.apply(vote(1, ParticipationStatus::Attending, Some("10분 늦습니다")));

        assert_eq!(board.status_for(1), Some(ParticipationStatus::Attending));
        assert_eq!(board.get(1).unwrap().comment.as_deref(), Some("10분 늦습니다"));
        // The other match is untouched
        assert_eq!(board.status_for(2), Some(ParticipationStatus::Attending));
        assert_eq!(board.get(2).unwrap().comment.as_deref(), Some("카풀 구해요"));
    }

    #[test]
    fn test_apply_replaces_wholesale() {
        let mut board = VoteBoard::new();
        board.apply(vote(5, ParticipationStatus::Attending, Some("comment")));

        // The canonical response has no comment; the old one must not leak through
        let previous = board.apply(vote(5, ParticipationStatus::Absent, None));
        assert!(previous.is_some());
        assert_eq!(board.status_for(5), Some(ParticipationStatus::Absent));
        assert!(board.get(5).unwrap().comment.is_none());
    }

    #[test]
    fn test_full_reload_is_idempotent() {
        let mut board = VoteBoard::new();
        let snapshot = vec![
            vote(1, ParticipationStatus::Absent, None),
            vote(2, ParticipationStatus::Pending, None),
        ];
        board.load(snapshot.clone());
        board.load(snapshot);
        assert_eq!(board.len(), 2);
        assert_eq!(board.status_for(2), Some(ParticipationStatus::Pending));
    }

    #[test]
    fn test_clear() {
        let mut board = VoteBoard::new();
        board.apply(vote(1, ParticipationStatus::Attending, None));
        board.clear();
        assert!(board.is_empty());
        assert_eq!(board.get(1), None);
    }
}
