use tangled_backend::{
    api::router::create_router,
    config::Config,
    domain::services::{auth::AuthService, requests::RequestService},
    infra::repositories::{
        sqlite_game_repo::SqliteGameRepo,
        sqlite_request_repo::SqliteRequestRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            token_secret: "test-secret".to_string(),
            token_expire_hours: 24,
            hash_iterations: 2,
        };

        let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
        let game_repo = Arc::new(SqliteGameRepo::new(pool.clone()));
        let request_repo = Arc::new(SqliteRequestRepo::new(pool.clone()));

        let auth_service = Arc::new(AuthService::new(user_repo.clone(), &config));
        let request_service = Arc::new(RequestService::new(
            user_repo.clone(),
            game_repo.clone(),
            request_repo.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            user_repo,
            game_repo,
            request_repo,
            auth_service,
            request_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn create_user(&self, username: &str, password: &str, email: &str) {
        let payload = serde_json::json!({
            "username": username,
            "password": password,
            "email": email
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("User creation failed in test helper: status {}", response.status());
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let payload = serde_json::json!({
            "username": username,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        body_json["token"].as_str().expect("No token in body").to_string()
    }

    #[allow(dead_code)]
    pub async fn create_game(&self, token: &str, name: &str) {
        let payload = serde_json::json!({
            "name": name,
            "iconUrl": "http://img.example/icon.png",
            "bannerUrl": "http://img.example/banner.png",
            "genres": ["shooter"],
            "platforms": ["pc"]
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/games")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Game creation failed in test helper: status {}", response.status());
        }
    }

    #[allow(dead_code)]
    pub async fn create_request(
        &self,
        token: &str,
        user: &str,
        game: &str,
        title: &str,
        max_players: i64,
    ) -> String {
        let payload = serde_json::json!({
            "title": title,
            "user": user,
            "game": game,
            "platform": "pc",
            "tags": ["casual"],
            "location": "somewhere",
            "contactInfo": "discord: host#0001",
            "maxPlayers": max_players
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/requests")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Request creation failed in test helper: status {}", response.status());
        }

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        body_json["id"].as_str().expect("No id in body").to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
