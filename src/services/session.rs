//! Session bootstrap and lifecycle
//!
//! Resolves the stored credential into a Member on startup and keeps the
//! session state machine current: Unresolved -> Checking ->
//! Authenticated | Anonymous. The credential is discarded on any resolution
//! failure; approval-status routing on top of this state lives in
//! `middleware::auth` and is recomputed whenever the state changes.

use std::sync::Arc;

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::member::{KakaoLoginPayload, Member, RegisterMemberRequest};
use crate::services::backend::BackendClient;
use crate::state::store::CredentialStore;
use crate::utils::errors::{ApiError, MatchBuddyError, Result};

/// Session resolution state
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing attempted yet
    Unresolved,
    /// Credential resolution in progress
    Checking,
    /// Credential resolved to a live member record
    Authenticated(Member),
    /// No credential, or resolution failed and the credential was discarded
    Anonymous,
}

impl SessionState {
    pub fn member(&self) -> Option<&Member> {
        match self {
            SessionState::Authenticated(member) => Some(member),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Claims this client reads from its own session token. The signature is
/// the backend's business; only the expiry is inspected locally.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    #[allow(dead_code)]
    sub: Option<String>,
    #[allow(dead_code)]
    exp: i64,
}

/// Authentication/session service
#[derive(Clone)]
pub struct SessionService {
    backend: BackendClient,
    store: CredentialStore,
    state: Arc<RwLock<SessionState>>,
}

impl SessionService {
    /// Create a new SessionService instance
    pub fn new(backend: BackendClient, store: CredentialStore) -> Self {
        Self {
            backend,
            store,
            state: Arc::new(RwLock::new(SessionState::Unresolved)),
        }
    }

    /// Current session state
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// The authenticated member, if any
    pub async fn current_member(&self) -> Option<Member> {
        self.state.read().await.member().cloned()
    }

    async fn set_state(&self, next: SessionState) {
        *self.state.write().await = next;
    }

    /// Check a stored token's `exp` claim without verifying the signature.
    /// An undecodable token is NOT treated as expired; the backend gets to
    /// decide about anything this client cannot read.
    fn token_is_expired(token: &str) -> bool {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();

        match decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
            Ok(_) => false,
            Err(e) => matches!(e.kind(), ErrorKind::ExpiredSignature),
        }
    }

    async fn discard_credential(&self) -> Result<()> {
        self.store.clear().await?;
        self.backend.clear_token().await;
        Ok(())
    }

    /// Resolve the stored credential into a session state.
    ///
    /// Runs on every startup and is safe to run again at any time; the
    /// whole chain is: no credential -> Anonymous, expired credential ->
    /// discard + Anonymous, live credential -> member fetch ->
    /// Authenticated, fetch failure -> discard + Anonymous.
    pub async fn bootstrap(&self) -> Result<SessionState> {
        self.set_state(SessionState::Checking).await;

        let token = match self.store.load().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Credential store unavailable during bootstrap");
                self.set_state(SessionState::Anonymous).await;
                return Err(e);
            }
        };

        let Some(token) = token else {
            debug!("No stored credential, session is anonymous");
            self.set_state(SessionState::Anonymous).await;
            return Ok(SessionState::Anonymous);
        };

        if Self::token_is_expired(&token) {
            info!("Stored credential has expired, discarding");
            self.discard_credential().await?;
            self.set_state(SessionState::Anonymous).await;
            return Ok(SessionState::Anonymous);
        }

        self.backend.set_token(&token).await;

        match self.backend.get_me().await {
            Ok(member) => {
                info!(member_id = member.id, status = ?member.status, "Session resolved");
                let state = SessionState::Authenticated(member);
                self.set_state(state.clone()).await;
                Ok(state)
            }
            Err(e) => {
                warn!(error = %e, "Credential did not resolve, discarding");
                self.discard_credential().await?;
                self.set_state(SessionState::Anonymous).await;
                Ok(SessionState::Anonymous)
            }
        }
    }

    /// Log in with the Kakao identity: register the member on first login
    /// (an "already exists" rejection is success), exchange for a session
    /// token, persist it and resolve the member.
    pub async fn login(&self, payload: KakaoLoginPayload, picture_url: Option<String>) -> Result<Member> {
        self.set_state(SessionState::Checking).await;

        let register = RegisterMemberRequest::new(
            payload.kakao_id.clone(),
            payload.name.clone(),
            payload.email.clone(),
            picture_url,
        );

        match self.backend.register_member(&register).await {
            Ok(member) => {
                debug!(member_id = member.id, "Member registered on first login");
            }
            Err(MatchBuddyError::Api(ApiError::Status { status: 400, ref detail }))
                if detail.contains("exists") =>
            {
                debug!(kakao_id = %payload.kakao_id, "Member already registered");
            }
            Err(e) => {
                self.set_state(SessionState::Anonymous).await;
                return Err(e);
            }
        }

        let token = match self.backend.login_kakao(&payload).await {
            Ok(token) => token,
            Err(e) => {
                self.set_state(SessionState::Anonymous).await;
                return Err(e);
            }
        };

        self.store.save(&token.access_token).await?;
        self.backend.set_token(&token.access_token).await;

        let member = match self.backend.get_me().await {
            Ok(member) => member,
            Err(e) => {
                self.discard_credential().await?;
                self.set_state(SessionState::Anonymous).await;
                return Err(e);
            }
        };

        info!(member_id = member.id, status = ?member.status, "Login completed");
        self.set_state(SessionState::Authenticated(member.clone())).await;
        Ok(member)
    }

    /// Re-fetch the current member so approval-status changes made by a
    /// manager take effect without a fresh login. Resolution failure
    /// discards the credential, exactly like bootstrap.
    pub async fn refresh_member(&self) -> Result<SessionState> {
        if self.backend.token().await.is_none() {
            self.set_state(SessionState::Anonymous).await;
            return Ok(SessionState::Anonymous);
        }

        match self.backend.get_me().await {
            Ok(member) => {
                debug!(member_id = member.id, status = ?member.status, "Member refreshed");
                let state = SessionState::Authenticated(member);
                self.set_state(state.clone()).await;
                Ok(state)
            }
            Err(e) => {
                warn!(error = %e, "Member refresh failed, discarding credential");
                self.discard_credential().await?;
                self.set_state(SessionState::Anonymous).await;
                Ok(SessionState::Anonymous)
            }
        }
    }

    /// Clear the stored credential and all derived state
    pub async fn logout(&self) -> Result<()> {
        self.discard_credential().await?;
        self.set_state(SessionState::Anonymous).await;
        info!("Logged out");
        Ok(())
    }

    /// Mid-session state override used when another service already holds a
    /// fresher member record (e.g. a profile update response)
    pub async fn install_member(&self, member: Member) {
        self.set_state(SessionState::Authenticated(member)).await;
    }
}
