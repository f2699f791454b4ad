//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the MatchBuddy application.

use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "matchbuddy.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log vote actions with structured data
pub fn log_vote_action(member_id: i64, match_id: i64, status: &str, success: bool) {
    if success {
        info!(
            member_id = member_id,
            match_id = match_id,
            status = status,
            "Vote recorded"
        );
    } else {
        warn!(
            member_id = member_id,
            match_id = match_id,
            status = status,
            "Vote rejected"
        );
    }
}

/// Log session lifecycle events
pub fn log_session_event(event: &str, member_id: Option<i64>, details: Option<&str>) {
    info!(
        event = event,
        member_id = member_id,
        details = details,
        "Session event"
    );
}

/// Log manager actions (match mutations, overrides, approvals)
pub fn log_manager_action(manager_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        manager_id = manager_id,
        action = action,
        target = target,
        details = details,
        "Manager action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log route guard decisions
pub fn log_route_decision(route: &str, decision: &str, member_id: Option<i64>) {
    debug!(
        route = route,
        decision = decision,
        member_id = member_id,
        "Route guard evaluated"
    );
}
