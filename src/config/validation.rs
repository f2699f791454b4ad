//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{MatchBuddyError, Result};

use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_backend_config(&settings.backend)?;
    validate_club_config(&settings.club)?;
    validate_session_config(settings)?;
    validate_logging_config(&settings.logging)?;

    if settings.features.kakao_messaging {
        validate_kakao_config(&settings.kakao)?;
    }

    Ok(())
}

/// Validate backend API configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(MatchBuddyError::Config(
            "Backend base URL is required".to_string(),
        ));
    }

    url::Url::parse(&config.base_url)?;

    if config.timeout_seconds == 0 {
        return Err(MatchBuddyError::Config(
            "Backend timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate club configuration
fn validate_club_config(config: &super::ClubConfig) -> Result<()> {
    if config.club_id <= 0 {
        return Err(MatchBuddyError::Config(
            "Club id must be a positive integer".to_string(),
        ));
    }

    if config.name.is_empty() {
        return Err(MatchBuddyError::Config(
            "Club name is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate Kakao configuration
fn validate_kakao_config(config: &super::KakaoConfig) -> Result<()> {
    if config.client_id.is_empty() {
        return Err(MatchBuddyError::Config(
            "Kakao client id is required when Kakao messaging is enabled".to_string(),
        ));
    }

    if config.api_url.is_empty() || config.auth_url.is_empty() {
        return Err(MatchBuddyError::Config(
            "Kakao API and auth URLs are required".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(MatchBuddyError::Config(
            "Kakao timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate session storage configuration
fn validate_session_config(settings: &Settings) -> Result<()> {
    let config = &settings.session;

    if settings.features.redis_sessions && config.redis_url.is_empty() {
        return Err(MatchBuddyError::Config(
            "Session Redis URL is required when redis_sessions is enabled".to_string(),
        ));
    }

    if config.ttl_seconds == 0 {
        return Err(MatchBuddyError::Config(
            "Session TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(MatchBuddyError::Config(
            "Log level is required".to_string(),
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(MatchBuddyError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
