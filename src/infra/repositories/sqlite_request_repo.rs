use crate::domain::{
    models::request::GameRequest,
    ports::{JoinOutcome, RequestQuery, RequestRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const COLUMNS: &str = "id, title, user_id, game_id, platform, tags, location, \
     contact_info, max_players, is_active, created_at, updated_at";

pub struct SqliteRequestRepo {
    pool: SqlitePool,
}

impl SqliteRequestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestRepository for SqliteRequestRepo {
    async fn create(&self, request: &GameRequest) -> Result<GameRequest, AppError> {
        sqlx::query_as::<_, GameRequest>(&format!(
            "INSERT INTO requests ({COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        ))
        .bind(&request.id)
        .bind(&request.title)
        .bind(&request.user_id)
        .bind(&request.game_id)
        .bind(&request.platform)
        .bind(Json(&request.tags))
        .bind(&request.location)
        .bind(&request.contact_info)
        .bind(request.max_players)
        .bind(request.is_active)
        .bind(request.created_at)
        .bind(request.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<GameRequest>, AppError> {
        sqlx::query_as::<_, GameRequest>(&format!("SELECT {COLUMNS} FROM requests WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, query: &RequestQuery) -> Result<Vec<GameRequest>, AppError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT r.id, r.title, r.user_id, r.game_id, r.platform, r.tags, r.location, \
             r.contact_info, r.max_players, r.is_active, r.created_at, r.updated_at \
             FROM requests r WHERE 1 = 1",
        );

        if let Some(owner_id) = &query.owner_id {
            builder.push(" AND r.user_id = ").push_bind(owner_id);
        }
        if let Some(game_id) = &query.game_id {
            builder.push(" AND r.game_id = ").push_bind(game_id);
        }
        if let Some(participant_id) = &query.participant_id {
            builder
                .push(" AND EXISTS (SELECT 1 FROM request_players rp WHERE rp.request_id = r.id AND rp.user_id = ")
                .push_bind(participant_id)
                .push(")");
        }
        if let Some(tags) = &query.tags {
            // Intersection: any of the given tags appears in the request's
            // JSON tag array.
            builder.push(" AND EXISTS (SELECT 1 FROM json_each(r.tags) WHERE json_each.value IN (");
            let mut separated = builder.separated(", ");
            for tag in tags {
                separated.push_bind(tag);
            }
            separated.push_unseparated("))");
        }
        if let Some(location) = &query.location {
            builder.push(" AND r.location = ").push_bind(location);
        }

        builder.push(" ORDER BY r.created_at DESC, r.rowid DESC");

        builder
            .build_query_as::<GameRequest>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, request: &GameRequest) -> Result<GameRequest, AppError> {
        sqlx::query_as::<_, GameRequest>(&format!(
            "UPDATE requests SET title = ?, game_id = ?, platform = ?, tags = ?, \
             location = ?, contact_info = ?, max_players = ?, is_active = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {COLUMNS}"
        ))
        .bind(&request.title)
        .bind(&request.game_id)
        .bind(&request.platform)
        .bind(Json(&request.tags))
        .bind(&request.location)
        .bind(&request.contact_info)
        .bind(request.max_players)
        .bind(request.is_active)
        .bind(request.updated_at)
        .bind(&request.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn add_player(&self, request_id: &str, user_id: &str) -> Result<JoinOutcome, AppError> {
        // One statement evaluates the active flag and the capacity bound
        // and appends the player; the composite primary key swallows a
        // concurrent double-join. SQLite executes it atomically, so two
        // racing joins cannot both observe the seat as free.
        let result = sqlx::query(
            "INSERT OR IGNORE INTO request_players (request_id, user_id, joined_at) \
             SELECT ?1, ?2, ?3 \
             WHERE EXISTS ( \
                 SELECT 1 FROM requests \
                 WHERE id = ?1 AND is_active = 1 \
                   AND (SELECT COUNT(*) FROM request_players WHERE request_id = ?1) < max_players \
             )",
        )
        .bind(request_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 1 {
            return Ok(JoinOutcome::Joined);
        }

        // Zero rows affected: the player was already in, the request is
        // closed, or it is at capacity. Disambiguate for the caller.
        let already: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM request_players WHERE request_id = ? AND user_id = ?",
        )
        .bind(request_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if already.is_some() {
            return Ok(JoinOutcome::AlreadyJoined);
        }

        let is_active: Option<bool> = sqlx::query_scalar("SELECT is_active FROM requests WHERE id = ?")
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        match is_active {
            Some(true) => Ok(JoinOutcome::Full),
            Some(false) => Ok(JoinOutcome::Inactive),
            None => Err(AppError::NotFound("request".into())),
        }
    }

    async fn remove_player(&self, request_id: &str, user_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM request_players WHERE request_id = ? AND user_id = ?")
            .bind(request_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn set_players(&self, request_id: &str, user_ids: &[String]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM request_players WHERE request_id = ?")
            .bind(request_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for user_id in user_ids {
            sqlx::query("INSERT INTO request_players (request_id, user_id, joined_at) VALUES (?, ?, ?)")
                .bind(request_id)
                .bind(user_id)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)
    }

    async fn list_players(&self, request_id: &str) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            "SELECT user_id FROM request_players WHERE request_id = ? ORDER BY joined_at ASC, rowid ASC",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
