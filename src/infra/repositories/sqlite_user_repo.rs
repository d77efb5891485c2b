use crate::domain::{models::user::User, ports::UserRepository};
use crate::error::AppError;
use crate::infra::repositories::map_unique;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, username, email, role, password_hash, salt, iterations, \
     subscribed_tags, notification_tags, discord_id, steam_id, battle_net_id, \
     profile_pic_url, first_time_setup, created_at";

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        ))
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.role)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .bind(user.iterations)
        .bind(Json(&user.subscribed_tags))
        .bind(Json(&user.notification_tags))
        .bind(&user.discord_id)
        .bind(&user.steam_id)
        .bind(&user.battle_net_id)
        .bind(&user.profile_pic_url)
        .bind(user.first_time_setup)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, &[("users.username", "username"), ("users.email", "email")]))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE username = ?"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users ORDER BY username ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET email = ?, password_hash = ?, salt = ?, iterations = ?, \
             subscribed_tags = ?, notification_tags = ?, discord_id = ?, steam_id = ?, \
             battle_net_id = ?, profile_pic_url = ?, first_time_setup = ? \
             WHERE id = ? \
             RETURNING {COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.salt)
        .bind(user.iterations)
        .bind(Json(&user.subscribed_tags))
        .bind(Json(&user.notification_tags))
        .bind(&user.discord_id)
        .bind(&user.steam_id)
        .bind(&user.battle_net_id)
        .bind(&user.profile_pic_url)
        .bind(user.first_time_setup)
        .bind(&user.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, &[("users.email", "email")]))
    }
}
