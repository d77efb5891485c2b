use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub name: String,
    pub icon_url: Option<String>,
    pub banner_url: Option<String>,
    #[sqlx(json)]
    pub genres: Vec<String>,
    #[sqlx(json)]
    pub platforms: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(
        name: String,
        icon_url: Option<String>,
        banner_url: Option<String>,
        genres: Vec<String>,
        platforms: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            icon_url,
            banner_url,
            genres,
            platforms,
            created_at: Utc::now(),
        }
    }
}
