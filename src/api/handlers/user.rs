use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateUserRequest, UpdateUserRequest};
use crate::api::dtos::responses::UsernamesResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::{User, UserView};
use crate::domain::services::credentials;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::{error, info};

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("username must not be blank".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("password must not be blank".into()));
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(AppError::Validation("email is missing or malformed".into()));
    }

    let credential = credentials::derive(&payload.password, state.config.hash_iterations)?;
    let user = User::new(payload.username, payload.email, credential);

    // No pre-check for an existing username or email: the unique indexes
    // decide, and the repo reports which field collided.
    let created = state.user_repo.create(&user).await?;

    info!("Created user: {}", created.id);

    Ok((StatusCode::CREATED, Json(UserView::from(created))))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list_all().await?;
    let usernames = users.into_iter().map(|u| u.username).collect();

    Ok(Json(UsernamesResponse { users: usernames }))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_repo
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("user".into()))?;

    Ok(Json(UserView::from(user)))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(username): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if identity != username {
        return Err(AppError::Forbidden("You may only edit your own profile".into()));
    }

    let mut user = state
        .user_repo
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("user".into()))?;

    // Profile edits re-authenticate against the current password even with
    // a valid token.
    let matches = credentials::verify(
        &user.password_hash,
        &payload.current_password,
        &user.salt,
        user.iterations as u32,
    )
    .map_err(|e| {
        error!("Stored credential for {} is malformed: {}", username, e);
        AppError::Internal
    })?;

    if !matches {
        return Err(AppError::Unauthorized);
    }

    let edit = payload.edit_data;

    if let Some(email) = edit.email {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(AppError::Validation("email is missing or malformed".into()));
        }
        user.email = email;
    }
    if let Some(password) = edit.password {
        if password.is_empty() {
            return Err(AppError::Validation("password must not be blank".into()));
        }
        let credential = credentials::derive(&password, state.config.hash_iterations)?;
        user.password_hash = credential.hash;
        user.salt = credential.salt;
        user.iterations = credential.iterations as i64;
    }
    if let Some(subscribed_tags) = edit.subscribed_tags {
        user.subscribed_tags = subscribed_tags;
    }
    if let Some(notification_tags) = edit.notification_tags {
        user.notification_tags = notification_tags;
    }
    if let Some(discord_id) = edit.discord_id {
        user.discord_id = Some(discord_id);
    }
    if let Some(steam_id) = edit.steam_id {
        user.steam_id = Some(steam_id);
    }
    if let Some(battle_net_id) = edit.battle_net_id {
        user.battle_net_id = Some(battle_net_id);
    }
    if let Some(profile_pic_url) = edit.profile_pic_url {
        user.profile_pic_url = Some(profile_pic_url);
    }
    if let Some(first_time_setup) = edit.first_time_setup {
        user.first_time_setup = first_time_setup;
    }

    let updated = state.user_repo.update(&user).await?;

    info!("User updated: {}", updated.id);

    Ok(Json(UserView::from(updated)))
}
