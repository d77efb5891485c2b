mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn join(app: &TestApp, token: &str, id: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/requests/{}/join", id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()
}

async fn leave(app: &TestApp, token: &str, id: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/requests/{}/leave", id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()
}

async fn player_count(app: &TestApp, token: &str, id: &str) -> usize {
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/requests/{}", id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    body["currentPlayers"].as_array().unwrap().len()
}

#[tokio::test]
async fn test_capacity_lifecycle() {
    let app = TestApp::new().await;
    app.create_user("alice", "pw1", "a@x.com").await;
    app.create_user("bob", "pw2", "b@x.com").await;
    app.create_user("carol", "pw3", "c@x.com").await;
    app.create_user("dave", "pw4", "d@x.com").await;

    let alice = app.login("alice", "pw1").await;
    let bob = app.login("bob", "pw2").await;
    let carol = app.login("carol", "pw3").await;
    let dave = app.login("dave", "pw4").await;

    app.create_game(&alice, "Chess").await;
    let id = app.create_request(&alice, "alice", "Chess", "Friendly", 2).await;

    assert_eq!(join(&app, &bob, &id).await.status(), StatusCode::OK);
    assert_eq!(join(&app, &carol, &id).await.status(), StatusCode::OK);

    // Full: dave bounces.
    assert_eq!(join(&app, &dave, &id).await.status(), StatusCode::CONFLICT);
    assert_eq!(player_count(&app, &alice, &id).await, 2);

    // A seat frees up and dave gets in.
    assert_eq!(leave(&app, &bob, &id).await.status(), StatusCode::OK);
    assert_eq!(join(&app, &dave, &id).await.status(), StatusCode::OK);
    assert_eq!(player_count(&app, &alice, &id).await, 2);
}

#[tokio::test]
async fn test_join_is_idempotent() {
    let app = TestApp::new().await;
    app.create_user("alice", "pw1", "a@x.com").await;
    app.create_user("bob", "pw2", "b@x.com").await;
    let alice = app.login("alice", "pw1").await;
    let bob = app.login("bob", "pw2").await;
    app.create_game(&alice, "Chess").await;
    let id = app.create_request(&alice, "alice", "Chess", "Friendly", 4).await;

    assert_eq!(join(&app, &bob, &id).await.status(), StatusCode::OK);
    assert_eq!(join(&app, &bob, &id).await.status(), StatusCode::OK);
    assert_eq!(player_count(&app, &alice, &id).await, 1);
}

#[tokio::test]
async fn test_leave_by_non_participant_is_a_noop() {
    let app = TestApp::new().await;
    app.create_user("alice", "pw1", "a@x.com").await;
    app.create_user("bob", "pw2", "b@x.com").await;
    let alice = app.login("alice", "pw1").await;
    let bob = app.login("bob", "pw2").await;
    app.create_game(&alice, "Chess").await;
    let id = app.create_request(&alice, "alice", "Chess", "Friendly", 4).await;

    assert_eq!(leave(&app, &bob, &id).await.status(), StatusCode::OK);
    assert_eq!(player_count(&app, &alice, &id).await, 0);
}

#[tokio::test]
async fn test_join_missing_request_is_404() {
    let app = TestApp::new().await;
    app.create_user("alice", "pw1", "a@x.com").await;
    let token = app.login("alice", "pw1").await;

    assert_eq!(join(&app, &token, "no-such-id").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(leave(&app, &token, "no-such-id").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inactive_request_rejects_joins_but_allows_leaves() {
    let app = TestApp::new().await;
    app.create_user("alice", "pw1", "a@x.com").await;
    app.create_user("bob", "pw2", "b@x.com").await;
    app.create_user("carol", "pw3", "c@x.com").await;
    let alice = app.login("alice", "pw1").await;
    let bob = app.login("bob", "pw2").await;
    let carol = app.login("carol", "pw3").await;
    app.create_game(&alice, "Chess").await;
    let id = app.create_request(&alice, "alice", "Chess", "Friendly", 4).await;

    assert_eq!(join(&app, &bob, &id).await.status(), StatusCode::OK);

    // Owner closes the request.
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/requests/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", alice))
            .body(Body::from(json!({"isActive": false}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(join(&app, &carol, &id).await.status(), StatusCode::BAD_REQUEST);

    // Leaving still works, and the closed request stays fetchable.
    assert_eq!(leave(&app, &bob, &id).await.status(), StatusCode::OK);
    assert_eq!(player_count(&app, &alice, &id).await, 0);
}
