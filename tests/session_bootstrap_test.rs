//! Session bootstrap and route guard integration tests
//!
//! Drives the real SessionService against a wiremock backend: credential
//! resolution, discard-on-failure, expiry short-circuit, login and the
//! mid-session approval flow.

mod helpers;

use assert_matches::assert_matches;
use chrono::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use MatchBuddy::middleware::{resolve_route, Route, RouteDecision};
use MatchBuddy::models::MemberStatus;
use MatchBuddy::services::SessionState;

use helpers::{member_json, session_token, test_factory};

#[tokio::test]
async fn bootstrap_without_credential_is_anonymous_and_offline() {
    let (server, services, _store) = test_factory().await;

    // The member endpoint must never be hit when there is no credential
    Mock::given(method("GET"))
        .and(path("/members/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = services.session_service.bootstrap().await.unwrap();
    assert_eq!(state, SessionState::Anonymous);

    assert_matches!(
        resolve_route(&state, Route::Dashboard),
        RouteDecision::Redirect { to: Route::Login, .. }
    );
}

#[tokio::test]
async fn bootstrap_resolves_active_member() {
    let (server, services, store) = test_factory().await;
    store.save(&session_token(Duration::days(7))).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/members/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(member_json(42, "홍길동", "ACTIVE", &["VIEWER"])),
        )
        .mount(&server)
        .await;

    let state = services.session_service.bootstrap().await.unwrap();
    let member = state.member().expect("authenticated");
    assert_eq!(member.id, 42);
    assert_eq!(member.status, MemberStatus::Active);

    assert_eq!(resolve_route(&state, Route::Dashboard), RouteDecision::Allow);
    // The token travelled as a bearer header
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("Bearer "));
}

#[tokio::test]
async fn failed_resolution_discards_credential() {
    let (server, services, store) = test_factory().await;
    store.save(&session_token(Duration::days(7))).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/members/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "Could not validate credentials"
        })))
        .mount(&server)
        .await;

    let state = services.session_service.bootstrap().await.unwrap();
    assert_eq!(state, SessionState::Anonymous);
    // Credential must be gone so the next load starts clean
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn expired_token_is_discarded_without_any_network_call() {
    let (server, services, store) = test_factory().await;
    store.save(&session_token(Duration::days(-1))).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/members/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = services.session_service.bootstrap().await.unwrap();
    assert_eq!(state, SessionState::Anonymous);
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn login_registers_exchanges_and_persists() {
    let (server, services, store) = test_factory().await;

    Mock::given(method("POST"))
        .and(path("/members/"))
        .and(body_partial_json(serde_json::json!({
            "kakao_id": "kakao-77",
            "status": "PENDING",
            "roles": ["VIEWER"],
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(member_json(77, "신입", "PENDING", &["VIEWER"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login/kakao"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": session_token(Duration::days(30)),
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/members/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(member_json(77, "신입", "PENDING", &["VIEWER"])),
        )
        .mount(&server)
        .await;

    let member = services
        .session_service
        .login(
            MatchBuddy::models::KakaoLoginPayload {
                kakao_id: "kakao-77".to_string(),
                name: "신입".to_string(),
                email: "new@example.com".to_string(),
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(member.status, MemberStatus::Pending);
    assert!(store.load().await.unwrap().is_some());

    // Unapproved members are confined to the waiting room
    let state = services.session_service.state().await;
    assert_matches!(
        resolve_route(&state, Route::Dashboard),
        RouteDecision::Redirect { to: Route::Pending, .. }
    );
}

#[tokio::test]
async fn login_treats_already_registered_as_success() {
    let (server, services, _store) = test_factory().await;

    Mock::given(method("POST"))
        .and(path("/members/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "detail": "Member already exists"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login/kakao"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": session_token(Duration::days(30)),
            "token_type": "bearer",
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/members/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(member_json(42, "홍길동", "ACTIVE", &["VIEWER"])),
        )
        .mount(&server)
        .await;

    let member = services
        .session_service
        .login(
            MatchBuddy::models::KakaoLoginPayload {
                kakao_id: "kakao-42".to_string(),
                name: "홍길동".to_string(),
                email: "player@example.com".to_string(),
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(member.id, 42);
    assert!(services.session_service.state().await.is_authenticated());
}

#[tokio::test]
async fn approval_mid_session_unblocks_without_fresh_login() {
    let (server, services, store) = test_factory().await;
    store.save(&session_token(Duration::days(7))).await.unwrap();

    // First resolution sees a PENDING member, every later one sees ACTIVE
    Mock::given(method("GET"))
        .and(path("/members/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(member_json(42, "홍길동", "PENDING", &["VIEWER"])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/members/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(member_json(42, "홍길동", "ACTIVE", &["VIEWER"])),
        )
        .mount(&server)
        .await;

    let state = services.session_service.bootstrap().await.unwrap();
    assert_matches!(
        resolve_route(&state, Route::Dashboard),
        RouteDecision::Redirect { to: Route::Pending, .. }
    );

    // A manager approves the member; the session refreshes and the same
    // guard now lets them through, no logout involved
    let state = services.session_service.refresh_member().await.unwrap();
    assert_eq!(resolve_route(&state, Route::Dashboard), RouteDecision::Allow);
    assert_matches!(
        resolve_route(&state, Route::Pending),
        RouteDecision::Redirect { to: Route::Dashboard, .. }
    );
}

#[tokio::test]
async fn logout_clears_credential_and_state() {
    let (server, services, store) = test_factory().await;
    store.save(&session_token(Duration::days(7))).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/members/me"))
        .and(header("authorization", format!("Bearer {}", store.load().await.unwrap().unwrap())))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(member_json(42, "홍길동", "ACTIVE", &["VIEWER"])),
        )
        .mount(&server)
        .await;

    services.session_service.bootstrap().await.unwrap();
    assert!(services.session_service.state().await.is_authenticated());

    services.session_service.logout().await.unwrap();
    assert_eq!(services.session_service.state().await, SessionState::Anonymous);
    assert_eq!(store.load().await.unwrap(), None);
}
