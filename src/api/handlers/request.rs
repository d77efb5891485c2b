use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateRequestRequest, ListRequestsQuery, UpdateRequestRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::services::requests::{NewRequest, RequestFilter, RequestPatch};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use serde_json::json;
use tracing::info;

pub async fn create_request(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<CreateRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    if identity != payload.user {
        return Err(AppError::Forbidden("Requests can only be created for your own user".into()));
    }

    let created = state
        .request_service
        .create_from_names(NewRequest {
            title: payload.title,
            owner: payload.user,
            game: payload.game,
            platform: payload.platform,
            tags: payload.tags,
            location: payload.location,
            contact_info: payload.contact_info,
            max_players: payload.max_players,
        })
        .await?;

    info!("Request created: {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ListRequestsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tags = query.tags.map(|raw| {
        raw.split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>()
    });

    let requests = state
        .request_service
        .list(RequestFilter {
            user: query.user,
            game: query.game,
            joined: query.joined,
            tags,
            location: query.location,
        })
        .await?;

    Ok(Json(requests))
}

pub async fn get_request(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.request_service.get_populated(&id).await?;
    Ok(Json(request))
}

pub async fn update_request(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Authorization lives here, not in the lifecycle manager: only the
    // owner may edit.
    let current = state.request_service.get_populated(&id).await?;
    if current.user.username != identity {
        return Err(AppError::Forbidden("Only the owner may edit a request".into()));
    }

    let updated = state
        .request_service
        .edit(&id, RequestPatch {
            title: payload.title,
            game: payload.game,
            platform: payload.platform,
            tags: payload.tags,
            location: payload.location,
            contact_info: payload.contact_info,
            max_players: payload.max_players,
            current_players: payload.current_players,
            is_active: payload.is_active,
        })
        .await?;

    info!("Request updated: {}", updated.id);

    Ok(Json(updated))
}

pub async fn join_request(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.request_service.join(&identity, &id).await?;

    info!("User {} joined request {}", identity, id);

    Ok(Json(json!({ "status": "joined" })))
}

pub async fn leave_request(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.request_service.leave(&identity, &id).await?;

    info!("User {} left request {}", identity, id);

    Ok(Json(json!({ "status": "left" })))
}
