use axum::{extract::State, response::IntoResponse, Json};
use crate::api::dtos::requests::LoginRequest;
use crate::api::dtos::responses::AuthResponse;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("username must not be blank".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("password must not be blank".into()));
    }

    let (token, user) = state.auth_service.login(&payload.username, &payload.password).await?;

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
