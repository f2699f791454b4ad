//! Error handling for MatchBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for MatchBuddy application
#[derive(Error, Debug)]
pub enum MatchBuddyError {
    #[error("Backend API error: {0}")]
    Api(#[from] ApiError),

    #[error("Kakao API error: {0}")]
    Kakao(#[from] KakaoError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: i64 },

    #[error("Template not found: {template_id}")]
    TemplateNotFound { template_id: i64 },

    #[error("투표가 마감되었습니다.")]
    VotingClosed { match_id: i64 },

    #[error("투표가 아직 시작되지 않았습니다.")]
    VotingNotOpen { match_id: i64 },

    #[error("독려 알림(Soft Deadline) 이후에는 '미정'을 선택할 수 없습니다.")]
    UndecidedNotAllowed { match_id: i64 },

    #[error("Vote submission already in flight for match {match_id}")]
    SubmissionInFlight { match_id: i64 },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Club backend API specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    #[error("Backend request timed out")]
    Timeout,

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Backend service unavailable")]
    ServiceUnavailable,
}

/// Kakao API specific errors
#[derive(Error, Debug)]
pub enum KakaoError {
    #[error("Kakao API error: {0}")]
    ApiError(String),

    #[error("Kakao request timed out")]
    Timeout,

    #[error("Kakao session expired or missing")]
    SessionExpired,

    #[error("Message send failed: {0}")]
    SendFailed(String),
}

/// Result type alias for MatchBuddy operations
pub type Result<T> = std::result::Result<T, MatchBuddyError>;

/// Result type alias for backend API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Result type alias for Kakao operations
pub type KakaoResult<T> = std::result::Result<T, KakaoError>;

impl MatchBuddyError {
    /// Check if the error is recoverable by retrying the user action
    pub fn is_recoverable(&self) -> bool {
        match self {
            MatchBuddyError::Api(_) => true,
            MatchBuddyError::Kakao(_) => true,
            MatchBuddyError::Config(_) => false,
            MatchBuddyError::PermissionDenied(_) => false,
            MatchBuddyError::MatchNotFound { .. } => false,
            MatchBuddyError::TemplateNotFound { .. } => false,
            MatchBuddyError::VotingClosed { .. } => false,
            MatchBuddyError::VotingNotOpen { .. } => true,
            MatchBuddyError::UndecidedNotAllowed { .. } => false,
            MatchBuddyError::SubmissionInFlight { .. } => true,
            MatchBuddyError::Redis(_) => true,
            MatchBuddyError::Http(_) => true,
            MatchBuddyError::Serialization(_) => false,
            MatchBuddyError::Authentication(_) => false,
            MatchBuddyError::InvalidInput(_) => false,
            MatchBuddyError::ServiceUnavailable(_) => true,
            MatchBuddyError::UrlParse(_) => false,
        }
    }

    /// Check whether the error is a local voting precondition failure,
    /// i.e. detected before any network call was made
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            MatchBuddyError::VotingClosed { .. }
                | MatchBuddyError::VotingNotOpen { .. }
                | MatchBuddyError::UndecidedNotAllowed { .. }
                | MatchBuddyError::SubmissionInFlight { .. }
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MatchBuddyError::Config(_) => ErrorSeverity::Critical,
            MatchBuddyError::PermissionDenied(_) => ErrorSeverity::Warning,
            MatchBuddyError::Authentication(_) => ErrorSeverity::Warning,
            MatchBuddyError::VotingClosed { .. } => ErrorSeverity::Info,
            MatchBuddyError::VotingNotOpen { .. } => ErrorSeverity::Info,
            MatchBuddyError::UndecidedNotAllowed { .. } => ErrorSeverity::Info,
            MatchBuddyError::SubmissionInFlight { .. } => ErrorSeverity::Info,
            MatchBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
