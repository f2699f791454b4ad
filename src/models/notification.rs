//! Notification model
//!
//! Notification text is generated by the backend; this client only selects
//! the kind, previews the text and triggers delivery.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    PollingStart,
    SoftDeadline,
    HardDeadline,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::PollingStart => "POLLING_START",
            NotificationType::SoftDeadline => "SOFT_DEADLINE",
            NotificationType::HardDeadline => "HARD_DEADLINE",
        }
    }

    /// Korean label used by the notification center
    pub fn label(&self) -> &'static str {
        match self {
            NotificationType::PollingStart => "투표 시작",
            NotificationType::SoftDeadline => "마감 임박",
            NotificationType::HardDeadline => "최종 마감",
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "POLLING_START" => Ok(NotificationType::PollingStart),
            "SOFT_DEADLINE" => Ok(NotificationType::SoftDeadline),
            "HARD_DEADLINE" => Ok(NotificationType::HardDeadline),
            other => Err(format!("unknown notification type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Pending,
    SentToAdmin,
}

/// Preview response: the rendered message without a persisted record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPreview {
    pub message: String,
}

/// A generated notification persisted backend-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: i64,
    pub match_id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub content: String,
    pub status: NotificationStatus,
}

/// Body for the send-to-me relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSendRequest {
    pub kakao_access_token: String,
}
