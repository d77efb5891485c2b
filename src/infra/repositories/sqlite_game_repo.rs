use crate::domain::{models::game::Game, ports::GameRepository};
use crate::error::AppError;
use crate::infra::repositories::map_unique;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, icon_url, banner_url, genres, platforms, created_at";

pub struct SqliteGameRepo {
    pool: SqlitePool,
}

impl SqliteGameRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for SqliteGameRepo {
    async fn create(&self, game: &Game) -> Result<Game, AppError> {
        sqlx::query_as::<_, Game>(&format!(
            "INSERT INTO games ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(&game.id)
        .bind(&game.name)
        .bind(&game.icon_url)
        .bind(&game.banner_url)
        .bind(Json(&game.genres))
        .bind(Json(&game.platforms))
        .bind(game.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, &[("games.name", "name")]))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Game>, AppError> {
        sqlx::query_as::<_, Game>(&format!("SELECT {COLUMNS} FROM games WHERE name = ?"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Game>, AppError> {
        sqlx::query_as::<_, Game>(&format!("SELECT {COLUMNS} FROM games WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Game>, AppError> {
        sqlx::query_as::<_, Game>(&format!("SELECT {COLUMNS} FROM games ORDER BY name ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
