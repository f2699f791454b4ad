//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub backend: BackendConfig,
    pub club: ClubConfig,
    pub kakao: KakaoConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Club backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Club identity configuration (single-tenant: one fixed club)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClubConfig {
    pub club_id: i64,
    pub name: String,
    /// Public web address shared in notification links
    pub vote_url: String,
}

/// Kakao OAuth / messaging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KakaoConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub api_url: String,
    pub auth_url: String,
    pub timeout_seconds: u64,
}

/// Session credential storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub redis_url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    /// Persist session credentials in Redis; off means in-memory only
    pub redis_sessions: bool,
    /// Allow the notification center to push through Kakao
    pub kakao_messaging: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("MATCHBUDDY"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::MatchBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_seconds: 10,
            },
            club: ClubConfig {
                club_id: 1,
                name: "신사에이스 FC".to_string(),
                vote_url: "http://localhost:3000".to_string(),
            },
            kakao: KakaoConfig {
                client_id: String::new(),
                redirect_uri: "http://localhost:3000/auth/callback".to_string(),
                api_url: "https://kapi.kakao.com".to_string(),
                auth_url: "https://kauth.kakao.com".to_string(),
                timeout_seconds: 5,
            },
            session: SessionConfig {
                redis_url: "redis://localhost:6379".to_string(),
                prefix: "matchbuddy:".to_string(),
                ttl_seconds: 60 * 60 * 24 * 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/matchbuddy".to_string(),
            },
            features: FeaturesConfig {
                redis_sessions: true,
                kakao_messaging: true,
            },
        }
    }
}
