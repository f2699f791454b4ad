//! Shared test infrastructure
//!
//! Builds a ServiceFactory wired against a wiremock backend plus sample
//! wire payloads matching the club backend's response shapes.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use wiremock::MockServer;

use MatchBuddy::config::Settings;
use MatchBuddy::models::{Match, MatchStatus};
use MatchBuddy::services::ServiceFactory;
use MatchBuddy::state::CredentialStore;

/// Factory talking to a fresh mock backend, with an in-memory credential store
pub async fn test_factory() -> (MockServer, ServiceFactory, CredentialStore) {
    let server = MockServer::start().await;

    let mut settings = Settings::default();
    settings.backend.base_url = server.uri();
    settings.features.redis_sessions = false;
    settings.features.kakao_messaging = false;

    let store = CredentialStore::memory();
    let factory = ServiceFactory::with_store(settings, store.clone()).expect("factory");

    (server, factory, store)
}

/// A signed session token with the given expiry offset from now.
/// The signature key is irrelevant: the client only reads the exp claim.
pub fn session_token(expires_in: Duration) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[derive(serde::Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    let claims = Claims {
        sub: "42".to_string(),
        exp: (Utc::now() + expires_in).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .expect("token")
}

/// Backend member payload
pub fn member_json(id: i64, name: &str, status: &str, roles: &[&str]) -> Value {
    json!({
        "id": id,
        "kakao_id": format!("kakao-{id}"),
        "name": name,
        "status": status,
        "roles": roles,
    })
}

/// Backend participation payload
pub fn participation_json(
    id: i64,
    match_id: i64,
    member_id: i64,
    status: &str,
    comment: Option<&str>,
) -> Value {
    json!({
        "id": id,
        "match_id": match_id,
        "member_id": member_id,
        "status": status,
        "comment": comment,
        "member": {
            "id": member_id,
            "name": format!("선수{member_id}"),
        },
    })
}

/// Backend match payload with deadlines at fixed offsets from `start`
pub fn match_json(id: i64, start: DateTime<Utc>) -> Value {
    json!({
        "id": id,
        "club_id": 1,
        "name": "주말 매치",
        "location": "신사 풋살장",
        "status": "RECRUITING",
        "start_time": start.to_rfc3339(),
        "polling_start_at": (start - Duration::days(6)).to_rfc3339(),
        "soft_deadline_at": (start - Duration::days(2)).to_rfc3339(),
        "hard_deadline_at": (start - Duration::days(1)).to_rfc3339(),
        "min_participants": 10,
        "max_participants": 22,
        "participations": [],
    })
}

/// In-memory match with deadlines at the given hour offsets from now
/// (negative offsets are already in the past)
pub fn match_with_offsets(
    id: i64,
    poll_hours: i64,
    soft_hours: Option<i64>,
    hard_hours: i64,
) -> Match {
    let now = Utc::now();
    Match {
        id,
        club_id: 1,
        name: "주말 매치".to_string(),
        location: "신사 풋살장".to_string(),
        description: None,
        status: MatchStatus::Recruiting,
        start_time: now + Duration::hours(hard_hours + 24),
        end_time: None,
        duration_minutes: 120,
        polling_start_at: Some(now + Duration::hours(poll_hours)),
        soft_deadline_at: soft_hours.map(|h| now + Duration::hours(h)),
        hard_deadline_at: Some(now + Duration::hours(hard_hours)),
        min_participants: 10,
        max_participants: 22,
        participations: Vec::new(),
    }
}
