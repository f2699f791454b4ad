//! Services module
//!
//! This module contains business logic services

pub mod backend;
pub mod kakao;
pub mod matches;
pub mod members;
pub mod notification;
pub mod roster;
pub mod session;
pub mod voting;

// Re-export commonly used services
pub use backend::BackendClient;
pub use kakao::KakaoService;
pub use matches::{DashboardData, MatchService};
pub use members::MemberService;
pub use notification::NotificationService;
pub use roster::{aggregate_roster, attendee_summary, Roster, RosterCounts, RosterService};
pub use session::{SessionService, SessionState};
pub use voting::{display_label, evaluate_match_status, MatchWindow, VotePhase, VotingService};

use crate::config::settings::Settings;
use crate::state::store::CredentialStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub backend: BackendClient,
    pub session_service: SessionService,
    pub voting_service: VotingService,
    pub roster_service: RosterService,
    pub match_service: MatchService,
    pub member_service: MemberService,
    pub notification_service: NotificationService,
    pub kakao_service: KakaoService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory, picking the credential store backend
    /// from configuration
    pub async fn new(settings: Settings) -> Result<Self> {
        let store = if settings.features.redis_sessions {
            CredentialStore::redis(settings.session.clone()).await?
        } else {
            CredentialStore::memory()
        };

        Self::with_store(settings, store)
    }

    /// Create a ServiceFactory around an explicit credential store
    pub fn with_store(settings: Settings, store: CredentialStore) -> Result<Self> {
        let backend = BackendClient::new(&settings)?;
        let kakao_service = KakaoService::new(&settings)?;

        let session_service = SessionService::new(backend.clone(), store);
        let voting_service = VotingService::new(backend.clone());
        let roster_service = RosterService::new(backend.clone());
        let match_service = MatchService::new(backend.clone(), &settings);
        let member_service = MemberService::new(backend.clone());
        let notification_service = NotificationService::new(
            backend.clone(),
            kakao_service.clone(),
            settings.club.vote_url.clone(),
        );

        Ok(Self {
            backend,
            session_service,
            voting_service,
            roster_service,
            match_service,
            member_service,
            notification_service,
            kakao_service,
        })
    }
}
