use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::auth::AuthService;
use crate::domain::services::requests::RequestService;
use crate::infra::repositories::{
    sqlite_game_repo::SqliteGameRepo, sqlite_request_repo::SqliteRequestRepo,
    sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    let user_repo = Arc::new(SqliteUserRepo::new(pool.clone()));
    let game_repo = Arc::new(SqliteGameRepo::new(pool.clone()));
    let request_repo = Arc::new(SqliteRequestRepo::new(pool.clone()));

    let auth_service = Arc::new(AuthService::new(user_repo.clone(), config));
    let request_service = Arc::new(RequestService::new(
        user_repo.clone(),
        game_repo.clone(),
        request_repo.clone(),
    ));

    AppState {
        config: config.clone(),
        user_repo,
        game_repo,
        request_repo,
        auth_service,
        request_service,
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");
}
