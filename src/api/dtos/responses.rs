use serde::Serialize;

use crate::domain::models::user::UserView;

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

#[derive(Serialize)]
pub struct UsernamesResponse {
    pub users: Vec<String>,
}
