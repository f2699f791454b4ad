//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod matches;
pub mod member;
pub mod notification;
pub mod participation;
pub mod template;

// Re-export commonly used models
pub use matches::{GenerateMatchRequest, ManualMatchPayload, Match, MatchStatus, MatchUpdatePayload};
pub use member::{
    KakaoLoginPayload, Member, MemberAdminUpdate, MemberProfileUpdate, MemberStatus,
    RegisterMemberRequest, TokenResponse,
};
pub use notification::{
    NotificationPreview, NotificationRecord, NotificationSendRequest, NotificationStatus,
    NotificationType,
};
pub use participation::{
    MemberSummary, OverrideVoteRequest, Participation, ParticipationStatus, VoteRequest,
};
pub use template::{CreateTemplateRequest, MatchTemplate};
