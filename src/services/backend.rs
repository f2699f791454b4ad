//! Club backend API client
//!
//! This service wraps every backend endpoint the application consumes:
//! HTTP client setup with an explicit timeout, bearer-token injection,
//! response parsing and typed error mapping. The backend owns all
//! persistence and authorization; nothing here retries automatically.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::models::{
    CreateTemplateRequest, GenerateMatchRequest, KakaoLoginPayload, ManualMatchPayload, Match,
    MatchTemplate, MatchUpdatePayload, Member, MemberAdminUpdate, MemberProfileUpdate,
};
use crate::utils::errors::{ApiError, MatchBuddyError, Result};

/// Typed client for the club backend REST API
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl BackendClient {
    /// Create a new BackendClient instance
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.backend.timeout_seconds))
            .user_agent(concat!("MatchBuddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MatchBuddyError::Http)?;

        Ok(Self {
            client,
            base_url: settings.backend.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Install the session token used for authorized requests
    pub async fn set_token(&self, token: &str) {
        *self.token.write().await = Some(token.to_string());
    }

    /// Drop the session token
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    /// Current session token, if any
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_ref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn map_transport_error(e: reqwest::Error) -> MatchBuddyError {
        if e.is_timeout() {
            MatchBuddyError::Api(ApiError::Timeout)
        } else if e.is_connect() {
            MatchBuddyError::Api(ApiError::ServiceUnavailable)
        } else {
            MatchBuddyError::Api(ApiError::RequestFailed(e.to_string()))
        }
    }

    /// Pull the backend's `detail` field out of an error body, falling back
    /// to the raw text
    fn extract_detail(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.to_string())
    }

    async fn parse<T: DeserializeOwned>(&self, response: Response, context: &str) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = Self::extract_detail(&body);
            warn!(context = context, status = status.as_u16(), detail = %detail, "Backend returned error status");
            return Err(MatchBuddyError::Api(ApiError::Status {
                status: status.as_u16(),
                detail,
            }));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MatchBuddyError::Api(ApiError::InvalidResponse(e.to_string())))
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder, context: &str) -> Result<T> {
        let request_id = Uuid::new_v4();
        debug!(request_id = %request_id, context = context, "Sending backend request");

        let response = builder.send().await.map_err(Self::map_transport_error)?;
        self.parse(response, context).await
    }

    async fn execute_empty(&self, builder: RequestBuilder, context: &str) -> Result<()> {
        let request_id = Uuid::new_v4();
        debug!(request_id = %request_id, context = context, "Sending backend request");

        let response = builder.send().await.map_err(Self::map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = Self::extract_detail(&body);
            warn!(context = context, status = status.as_u16(), detail = %detail, "Backend returned error status");
            return Err(MatchBuddyError::Api(ApiError::Status {
                status: status.as_u16(),
                detail,
            }));
        }
        Ok(())
    }

    // --- Auth & members -----------------------------------------------------

    /// Exchange the Kakao identity for a backend session token
    pub async fn login_kakao(&self, payload: &KakaoLoginPayload) -> Result<crate::models::TokenResponse> {
        let builder = self.client.post(self.url("/auth/login/kakao")).json(payload);
        self.execute(builder, "login_kakao").await
    }

    /// Register a member record on first login
    pub async fn register_member(&self, request: &crate::models::RegisterMemberRequest) -> Result<Member> {
        let builder = self.client.post(self.url("/members/")).json(request);
        self.execute(builder, "register_member").await
    }

    /// Resolve the member behind the current session token
    pub async fn get_me(&self) -> Result<Member> {
        let builder = self.with_auth(self.client.get(self.url("/members/me"))).await;
        self.execute(builder, "get_me").await
    }

    /// Update the current member's profile fields
    pub async fn update_my_profile(&self, patch: &MemberProfileUpdate) -> Result<Member> {
        let builder = self
            .with_auth(self.client.patch(self.url("/members/me")))
            .await
            .json(patch);
        self.execute(builder, "update_my_profile").await
    }

    /// List every member of the club (manager views)
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        let builder = self.with_auth(self.client.get(self.url("/members/"))).await;
        self.execute(builder, "list_members").await
    }

    /// Manager-side member mutation (approval, rejection, roles)
    pub async fn update_member(&self, member_id: i64, patch: &MemberAdminUpdate) -> Result<Member> {
        let builder = self
            .with_auth(self.client.patch(self.url(&format!("/members/{member_id}"))))
            .await
            .json(patch);
        self.execute(builder, "update_member").await
    }

    // --- Matches ------------------------------------------------------------

    /// Upcoming matches for a club, ordered by the backend
    pub async fn get_upcoming_matches(&self, club_id: i64) -> Result<Vec<Match>> {
        let builder = self
            .with_auth(self.client.get(self.url(&format!("/matches/club/{club_id}"))))
            .await;
        self.execute(builder, "get_upcoming_matches").await
    }

    /// Stamp a match out of a template for a concrete date
    pub async fn generate_match(&self, request: &GenerateMatchRequest) -> Result<Match> {
        let builder = self
            .with_auth(self.client.post(self.url("/matches/generate")))
            .await
            .json(request);
        self.execute(builder, "generate_match").await
    }

    /// Create a one-off match without a template
    pub async fn create_manual_match(&self, payload: &ManualMatchPayload) -> Result<Match> {
        let builder = self
            .with_auth(self.client.post(self.url("/matches/")))
            .await
            .json(payload);
        self.execute(builder, "create_manual_match").await
    }

    /// Partially update a match
    pub async fn update_match(&self, match_id: i64, patch: &MatchUpdatePayload) -> Result<Match> {
        let builder = self
            .with_auth(self.client.patch(self.url(&format!("/matches/{match_id}"))))
            .await
            .json(patch);
        self.execute(builder, "update_match").await
    }

    /// Hard-delete a match (irreversible)
    pub async fn delete_match(&self, match_id: i64) -> Result<()> {
        let builder = self
            .with_auth(self.client.delete(self.url(&format!("/matches/{match_id}"))))
            .await;
        self.execute_empty(builder, "delete_match").await
    }

    // --- Templates ----------------------------------------------------------

    /// All templates belonging to a club
    pub async fn get_match_templates(&self, club_id: i64) -> Result<Vec<MatchTemplate>> {
        let builder = self
            .with_auth(
                self.client
                    .get(self.url(&format!("/match-templates/club/{club_id}"))),
            )
            .await;
        self.execute(builder, "get_match_templates").await
    }

    /// Create a new template
    pub async fn create_match_template(&self, request: &CreateTemplateRequest) -> Result<MatchTemplate> {
        let builder = self
            .with_auth(self.client.post(self.url("/match-templates/")))
            .await
            .json(request);
        self.execute(builder, "create_match_template").await
    }

    // --- Participations -----------------------------------------------------

    /// Every participation of the current member, keyed by match backend-side
    pub async fn get_my_participations(&self) -> Result<Vec<crate::models::Participation>> {
        let builder = self
            .with_auth(self.client.get(self.url("/participations/me")))
            .await;
        self.execute(builder, "get_my_participations").await
    }

    /// Upsert the current member's vote on a match
    pub async fn vote(
        &self,
        match_id: i64,
        request: &crate::models::VoteRequest,
    ) -> Result<crate::models::Participation> {
        let builder = self
            .with_auth(
                self.client
                    .post(self.url(&format!("/participations/matches/{match_id}/vote"))),
            )
            .await
            .json(request);
        self.execute(builder, "vote").await
    }

    /// Force-write any member's vote, bypassing the voting window
    pub async fn admin_override_vote(
        &self,
        request: &crate::models::OverrideVoteRequest,
    ) -> Result<crate::models::Participation> {
        let builder = self
            .with_auth(self.client.put(self.url("/participations/admin/override")))
            .await
            .json(request);
        self.execute(builder, "admin_override_vote").await
    }

    // --- Notifications ------------------------------------------------------

    /// Preview the backend-generated notification text
    pub async fn preview_notification(
        &self,
        match_id: i64,
        kind: crate::models::NotificationType,
    ) -> Result<crate::models::NotificationPreview> {
        let builder = self
            .with_auth(self.client.get(self.url("/notifications/preview")))
            .await
            .query(&[("match_id", match_id.to_string()), ("type", kind.as_str().to_string())]);
        self.execute(builder, "preview_notification").await
    }

    /// Generate and persist a notification record backend-side
    pub async fn generate_notification(
        &self,
        match_id: i64,
        kind: crate::models::NotificationType,
    ) -> Result<crate::models::NotificationRecord> {
        let builder = self
            .with_auth(self.client.post(self.url("/notifications/generate")))
            .await
            .query(&[("match_id", match_id.to_string()), ("type", kind.as_str().to_string())]);
        self.execute(builder, "generate_notification").await
    }

    /// Relay a generated notification to the requesting manager's KakaoTalk
    pub async fn send_notification_to_me(
        &self,
        notification_id: i64,
        request: &crate::models::NotificationSendRequest,
    ) -> Result<()> {
        let builder = self
            .with_auth(
                self.client
                    .post(self.url(&format!("/notifications/{notification_id}/send-to-me"))),
            )
            .await
            .json(request);
        self.execute_empty(builder, "send_notification_to_me").await
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
