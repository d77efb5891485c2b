use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::services::credentials::DerivedCredential;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub salt: String,
    pub iterations: i64,
    #[sqlx(json)]
    pub subscribed_tags: Vec<String>,
    #[sqlx(json)]
    pub notification_tags: Vec<String>,
    pub discord_id: Option<String>,
    pub steam_id: Option<String>,
    pub battle_net_id: Option<String>,
    pub profile_pic_url: Option<String>,
    pub first_time_setup: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, credential: DerivedCredential) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            role: "user".to_string(),
            password_hash: credential.hash,
            salt: credential.salt,
            iterations: credential.iterations as i64,
            subscribed_tags: Vec::new(),
            notification_tags: Vec::new(),
            discord_id: None,
            steam_id: None,
            battle_net_id: None,
            profile_pic_url: None,
            first_time_setup: true,
            created_at: Utc::now(),
        }
    }
}

/// What the outside world sees of a user. The credential fields do not
/// exist on this type, so they cannot leak through serialization.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub subscribed_tags: Vec<String>,
    pub notification_tags: Vec<String>,
    pub discord_id: Option<String>,
    pub steam_id: Option<String>,
    pub battle_net_id: Option<String>,
    pub profile_pic_url: Option<String>,
    pub first_time_setup: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            subscribed_tags: user.subscribed_tags,
            notification_tags: user.notification_tags,
            discord_id: user.discord_id,
            steam_id: user.steam_id,
            battle_net_id: user.battle_net_id,
            profile_pic_url: user.profile_pic_url,
            first_time_setup: user.first_time_setup,
            created_at: user.created_at,
        }
    }
}
