use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub current_password: String,
    pub edit_data: UserEdit,
}

/// The closed set of editable user fields. Username and role do not appear
/// here, so patches cannot reach them.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserEdit {
    pub email: Option<String>,
    pub password: Option<String>,
    pub subscribed_tags: Option<Vec<String>>,
    pub notification_tags: Option<Vec<String>>,
    pub discord_id: Option<String>,
    pub steam_id: Option<String>,
    pub battle_net_id: Option<String>,
    pub profile_pic_url: Option<String>,
    pub first_time_setup: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub name: String,
    pub icon_url: Option<String>,
    pub banner_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestRequest {
    pub title: String,
    /// Owner username; must match the authenticated identity.
    pub user: String,
    /// Game name, resolved server-side.
    pub game: String,
    pub platform: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: String,
    pub contact_info: String,
    pub max_players: i64,
}

/// The edit allow-list. Unknown keys in the body are dropped by serde, so
/// a patch can never mass-assign the owner or the timestamps.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestRequest {
    pub title: Option<String>,
    pub game: Option<String>,
    pub platform: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub contact_info: Option<String>,
    pub max_players: Option<i64>,
    /// Usernames replacing the participant set.
    pub current_players: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Listing criteria. Unlike body patches, an unrecognized filter key is a
/// caller mistake and rejected outright.
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ListRequestsQuery {
    pub user: Option<String>,
    pub game: Option<String>,
    pub joined: Option<String>,
    /// Comma-separated; matches any.
    pub tags: Option<String>,
    pub location: Option<String>,
}
