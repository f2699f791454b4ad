//! Notification center service
//!
//! Message text is generated by the backend from the live roster; this
//! service previews it, persists a record, and triggers delivery either
//! through the backend relay or directly to the requesting manager's
//! KakaoTalk for a test send.

use tracing::{info, warn};

use crate::models::notification::{NotificationRecord, NotificationSendRequest, NotificationType};
use crate::services::backend::BackendClient;
use crate::services::kakao::KakaoService;
use crate::utils::errors::{KakaoError, MatchBuddyError, Result};

/// Notification preview/dispatch operations
#[derive(Clone)]
pub struct NotificationService {
    backend: BackendClient,
    kakao: KakaoService,
    vote_link: String,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(backend: BackendClient, kakao: KakaoService, vote_link: String) -> Self {
        Self {
            backend,
            kakao,
            vote_link,
        }
    }

    /// Preview the message for a match/kind pair without persisting anything
    pub async fn preview(&self, match_id: i64, kind: NotificationType) -> Result<String> {
        let preview = self.backend.preview_notification(match_id, kind).await?;
        Ok(preview.message)
    }

    /// Generate and persist a notification record backend-side
    pub async fn generate(&self, match_id: i64, kind: NotificationType) -> Result<NotificationRecord> {
        let record = self.backend.generate_notification(match_id, kind).await?;
        info!(
            notification_id = record.id,
            match_id = match_id,
            kind = kind.as_str(),
            "Notification generated"
        );
        Ok(record)
    }

    /// Relay a generated notification to the requesting manager's KakaoTalk
    /// through the backend
    pub async fn send_to_me(&self, notification_id: i64, kakao_access_token: &str) -> Result<()> {
        if kakao_access_token.is_empty() {
            return Err(MatchBuddyError::Kakao(KakaoError::SessionExpired));
        }

        let request = NotificationSendRequest {
            kakao_access_token: kakao_access_token.to_string(),
        };
        self.backend.send_notification_to_me(notification_id, &request).await?;
        info!(notification_id = notification_id, "Notification relayed to announcer");
        Ok(())
    }

    /// Test-send: generate the record for a match/kind pair and relay it in
    /// one step, the way the notification center's button works
    pub async fn test_send(
        &self,
        match_id: i64,
        kind: NotificationType,
        kakao_access_token: &str,
    ) -> Result<NotificationRecord> {
        let record = self.generate(match_id, kind).await?;
        self.send_to_me(record.id, kakao_access_token).await?;
        Ok(record)
    }

    /// Push arbitrary text (e.g. a previewed message or an attendee
    /// summary) straight to the caller's own KakaoTalk
    pub async fn share_text(&self, message: &str, kakao_access_token: &str) -> Result<()> {
        if !self.kakao.is_enabled() {
            warn!("Kakao messaging disabled, dropping share request");
            return Err(MatchBuddyError::ServiceUnavailable(
                "Kakao messaging is disabled".to_string(),
            ));
        }

        self.kakao
            .send_text_to_me(kakao_access_token, message, &self.vote_link)
            .await?;
        Ok(())
    }
}
