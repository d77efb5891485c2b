use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::models::game::Game;
use crate::domain::models::user::UserView;

/// A hostable game-session listing. "Request" is the domain term for the
/// post a user creates to find other players, not an HTTP request.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub id: String,
    pub title: String,
    pub user_id: String,
    pub game_id: String,
    pub platform: String,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub location: String,
    pub contact_info: String,
    pub max_players: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewRequestParams {
    pub title: String,
    pub user_id: String,
    pub game_id: String,
    pub platform: String,
    pub tags: Vec<String>,
    pub location: String,
    pub contact_info: String,
    pub max_players: i64,
}

impl GameRequest {
    pub fn new(params: NewRequestParams) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            user_id: params.user_id,
            game_id: params.game_id,
            platform: params.platform,
            tags: params.tags,
            location: params.location,
            contact_info: params.contact_info,
            max_players: params.max_players,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A request with its owner, game and participants resolved into embedded
/// data. Assembled by the lifecycle manager; every contained user is the
/// redacted view.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedRequest {
    pub id: String,
    pub title: String,
    pub user: UserView,
    pub game: Game,
    pub platform: String,
    pub tags: Vec<String>,
    pub location: String,
    pub contact_info: String,
    pub max_players: i64,
    pub current_players: Vec<UserView>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PopulatedRequest {
    pub fn assemble(
        request: GameRequest,
        owner: UserView,
        game: Game,
        current_players: Vec<UserView>,
    ) -> Self {
        Self {
            id: request.id,
            title: request.title,
            user: owner,
            game,
            platform: request.platform,
            tags: request.tags,
            location: request.location,
            contact_info: request.contact_info,
            max_players: request.max_players,
            current_players,
            is_active: request.is_active,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}
