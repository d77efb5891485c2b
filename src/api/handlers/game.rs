use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::CreateGameRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::game::Game;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Json(payload): Json<CreateGameRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be blank".into()));
    }

    let game = Game::new(
        payload.name,
        payload.icon_url,
        payload.banner_url,
        payload.genres,
        payload.platforms,
    );

    let created = state.game_repo.create(&game).await?;

    info!("Created game: {} ({})", created.name, created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let games = state.game_repo.list_all().await?;
    Ok(Json(games))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let game = state
        .game_repo
        .find_by_name(&name)
        .await?
        .ok_or_else(|| AppError::NotFound("game".into()))?;

    Ok(Json(game))
}
