mod common;

use common::TestApp;
use std::sync::Arc;
use tangled_backend::domain::models::user::User;
use tangled_backend::domain::services::credentials;
use tangled_backend::error::AppError;
use tokio::task::JoinSet;

/// Fires many simultaneous joins at one request and checks the capacity
/// invariant at the storage layer: the conditional insert must never let
/// the participant set grow past maxPlayers, no matter the interleaving.
#[tokio::test]
async fn test_concurrent_joins_never_exceed_capacity() {
    let app = TestApp::new().await;

    let max_players: i64 = 3;
    let contenders = 8;

    app.create_user("host", "pw", "host@x.com").await;
    let token = app.login("host", "pw").await;
    app.create_game(&token, "Overwatch").await;
    let request_id = app.create_request(&token, "host", "Overwatch", "Scrim", max_players).await;

    for i in 0..contenders {
        app.create_user(&format!("player{}", i), "pw", &format!("p{}@x.com", i)).await;
    }

    let service = app.state.request_service.clone();
    let mut set = JoinSet::new();

    for i in 0..contenders {
        let service = service.clone();
        let request_id = request_id.clone();
        set.spawn(async move {
            service.join(&format!("player{}", i), &request_id).await
        });
    }

    let mut admitted = 0;
    let mut bounced = 0;
    while let Some(result) = set.join_next().await {
        match result.unwrap() {
            Ok(()) => admitted += 1,
            Err(AppError::Capacity) => bounced += 1,
            Err(e) => panic!("Unexpected join error: {:?}", e),
        }
    }

    assert_eq!(admitted, max_players as usize);
    assert_eq!(bounced, contenders - max_players as usize);

    let players = app.state.request_repo.list_players(&request_id).await.unwrap();
    assert_eq!(players.len(), max_players as usize);
}

/// The same user joining from two connections at once must land exactly
/// one membership row.
#[tokio::test]
async fn test_concurrent_double_join_is_single_membership() {
    let app = TestApp::new().await;

    app.create_user("host", "pw", "host@x.com").await;
    app.create_user("eager", "pw", "eager@x.com").await;
    let token = app.login("host", "pw").await;
    app.create_game(&token, "Chess").await;
    let request_id = app.create_request(&token, "host", "Chess", "Blitz", 5).await;

    let service = app.state.request_service.clone();
    let mut set = JoinSet::new();
    for _ in 0..4 {
        let service = service.clone();
        let request_id = request_id.clone();
        set.spawn(async move { service.join("eager", &request_id).await });
    }

    while let Some(result) = set.join_next().await {
        assert!(result.unwrap().is_ok());
    }

    let players = app.state.request_repo.list_players(&request_id).await.unwrap();
    assert_eq!(players.len(), 1);
}

/// Uniqueness is owned by the index, not by a pre-check: two simultaneous
/// creates with the same email end with exactly one row.
#[tokio::test]
async fn test_concurrent_duplicate_email_creates_one_winner() {
    let app = TestApp::new().await;
    let repo = app.state.user_repo.clone();

    let make_user = |username: &str| {
        let credential = credentials::derive("pw", 2).unwrap();
        User::new(username.to_string(), "shared@x.com".to_string(), credential)
    };

    let first = make_user("first");
    let second = make_user("second");

    let repo_a = Arc::clone(&repo);
    let repo_b = Arc::clone(&repo);
    let (a, b) = tokio::join!(
        async move { repo_a.create(&first).await },
        async move { repo_b.create(&second).await },
    );

    let outcomes = [a, b];
    let winners = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);

    let loser = outcomes.iter().find(|r| r.is_err()).unwrap();
    match loser {
        Err(AppError::Duplicate(field)) => assert_eq!(field, "email"),
        other => panic!("Expected a duplicate-email error, got {:?}", other.as_ref().err()),
    }

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
}
