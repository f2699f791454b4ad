//! Vote submission flow integration tests
//!
//! The local guards must fail without issuing a single request; successful
//! submissions must reconcile exactly one vote-board entry with the
//! backend's canonical response.

mod helpers;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use MatchBuddy::models::ParticipationStatus;
use MatchBuddy::MatchBuddyError;

use helpers::{match_json, match_with_offsets, participation_json, test_factory};

#[tokio::test]
async fn submit_vote_applies_canonical_response_to_one_entry() {
    let (server, services, _store) = test_factory().await;
    services.backend.set_token("session-token").await;

    // Open window: poll opened 48h ago, soft in 24h, hard in 48h
    let game = match_with_offsets(1, -48, Some(24), 48);
    let other = match_with_offsets(2, -48, Some(24), 48);

    services
        .voting_service
        .install_votes(vec![
            serde_json::from_value(participation_json(10, game.id, 7, "PENDING", None)).unwrap(),
            serde_json::from_value(participation_json(11, other.id, 7, "ABSENT", Some("부상"))).unwrap(),
        ])
        .await;

    // The backend normalizes the comment; its response must win wholesale
    Mock::given(method("POST"))
        .and(path("/participations/matches/1/vote"))
        .and(body_partial_json(serde_json::json!({
            "status": "ATTENDING",
            "comment": "10분 늦습니다",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(participation_json(
            10,
            1,
            7,
            "ATTENDING",
            Some("10분 늦습니다"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let participation = services
        .voting_service
        .submit_vote(&game, ParticipationStatus::Attending, Some("10분 늦습니다".to_string()))
        .await
        .unwrap();

    assert_eq!(participation.status, ParticipationStatus::Attending);

    // Only the affected match's entry changed
    let mine = services.voting_service.my_vote(1).await.unwrap();
    assert_eq!(mine.status, ParticipationStatus::Attending);
    let untouched = services.voting_service.my_vote(2).await.unwrap();
    assert_eq!(untouched.status, ParticipationStatus::Absent);
    assert_eq!(untouched.comment.as_deref(), Some("부상"));
}

#[tokio::test]
async fn vote_after_hard_deadline_fails_locally_without_network() {
    let (server, services, _store) = test_factory().await;

    Mock::given(method("POST"))
        .and(path("/participations/matches/1/vote"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // Hard deadline passed an hour ago
    let game = match_with_offsets(1, -96, Some(-24), -1);

    for status in [
        ParticipationStatus::Attending,
        ParticipationStatus::Absent,
        ParticipationStatus::Pending,
    ] {
        let err = services
            .voting_service
            .submit_vote(&game, status, None)
            .await
            .unwrap_err();
        assert!(err.is_precondition());
        assert_matches!(err, MatchBuddyError::VotingClosed { match_id: 1 });
    }
}

#[tokio::test]
async fn undecided_after_soft_deadline_fails_locally_but_decided_votes_pass() {
    let (server, services, _store) = test_factory().await;

    // Grace window: soft deadline passed, hard deadline still ahead
    let game = match_with_offsets(1, -96, Some(-12), 12);

    Mock::given(method("POST"))
        .and(path("/participations/matches/1/vote"))
        .and(body_partial_json(serde_json::json!({"status": "ATTENDING"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(participation_json(
            10,
            1,
            7,
            "ATTENDING",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let err = services
        .voting_service
        .submit_vote(&game, ParticipationStatus::Pending, None)
        .await
        .unwrap_err();
    assert_matches!(err, MatchBuddyError::UndecidedNotAllowed { match_id: 1 });

    // ATTENDING sails through in the same window
    services
        .voting_service
        .submit_vote(&game, ParticipationStatus::Attending, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn backend_rejection_leaves_local_state_untouched() {
    let (server, services, _store) = test_factory().await;

    let game = match_with_offsets(1, -48, Some(24), 48);
    services
        .voting_service
        .install_votes(vec![
            serde_json::from_value(participation_json(10, 1, 7, "PENDING", None)).unwrap(),
        ])
        .await;

    // The backend is the authoritative enforcer and may reject a write the
    // client-side guard allowed
    Mock::given(method("POST"))
        .and(path("/participations/matches/1/vote"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "detail": "Voting is closed (Deadline passed)"
        })))
        .mount(&server)
        .await;

    let err = services
        .voting_service
        .submit_vote(&game, ParticipationStatus::Attending, None)
        .await
        .unwrap_err();

    match err {
        MatchBuddyError::Api(api_err) => {
            assert_eq!(api_err.to_string(), "Backend returned HTTP 400: Voting is closed (Deadline passed)");
        }
        other => panic!("expected backend error, got {other:?}"),
    }

    // No optimistic mutation leaked into the board
    let mine = services.voting_service.my_vote(1).await.unwrap();
    assert_eq!(mine.status, ParticipationStatus::Pending);
}

#[tokio::test]
async fn manager_override_bypasses_closed_window() {
    let (server, services, _store) = test_factory().await;
    services.backend.set_token("manager-token").await;

    Mock::given(method("PUT"))
        .and(path("/participations/admin/override"))
        .and(body_partial_json(serde_json::json!({
            "match_id": 1,
            "member_id": 12,
            "status": "ATTENDING",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(participation_json(
            30,
            1,
            12,
            "ATTENDING",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    // The window closed a day ago; the override goes through anyway
    let participation = services
        .roster_service
        .override_vote(MatchBuddy::models::OverrideVoteRequest {
            match_id: 1,
            member_id: 12,
            status: ParticipationStatus::Attending,
            comment: None,
        })
        .await
        .unwrap();

    assert_eq!(participation.status, ParticipationStatus::Attending);
}

#[tokio::test]
async fn dashboard_join_fails_when_either_fetch_fails() {
    let (server, services, _store) = test_factory().await;

    Mock::given(method("GET"))
        .and(path("/matches/club/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([match_json(1, Utc::now() + Duration::days(3))])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/participations/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    // One half failing fails the whole join; no partial render
    let err = services.match_service.load_dashboard().await.unwrap_err();
    assert_matches!(err, MatchBuddyError::Api(_));
}

#[tokio::test]
async fn dashboard_join_returns_both_halves() {
    let (server, services, _store) = test_factory().await;

    Mock::given(method("GET"))
        .and(path("/matches/club/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            match_json(1, Utc::now() + Duration::days(3)),
            match_json(2, Utc::now() + Duration::days(10)),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/participations/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            participation_json(10, 1, 7, "ATTENDING", None),
        ])))
        .mount(&server)
        .await;

    let data = services.match_service.load_dashboard().await.unwrap();
    assert_eq!(data.matches.len(), 2);
    assert_eq!(data.participations.len(), 1);

    services.voting_service.install_votes(data.participations).await;
    assert_eq!(
        services.voting_service.my_vote(1).await.unwrap().status,
        ParticipationStatus::Attending
    );
    assert!(services.voting_service.my_vote(2).await.is_none());
}
