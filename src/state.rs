use std::sync::Arc;
use crate::domain::ports::{GameRepository, RequestRepository, UserRepository};
use crate::domain::services::auth::AuthService;
use crate::domain::services::requests::RequestService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub game_repo: Arc<dyn GameRepository>,
    pub request_repo: Arc<dyn RequestRepository>,
    pub auth_service: Arc<AuthService>,
    pub request_service: Arc<RequestService>,
}
