use crate::domain::models::{game::Game, request::GameRequest, user::User};
use crate::error::AppError;
use async_trait::async_trait;

/// Lookups return `Ok(None)` for a missing row. "Not found" is a typed
/// result everywhere in this crate, never an error or a panic.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `AppError::Duplicate("username" | "email")` on a
    /// uniqueness violation; the unique indexes are the authority.
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list_all(&self) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Fails with `AppError::Duplicate("name")` when the game name exists.
    async fn create(&self, game: &Game) -> Result<Game, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Game>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Game>, AppError>;
    async fn list_all(&self) -> Result<Vec<Game>, AppError>;
}

/// Outcome of the atomic join insert. `Joined` and `AlreadyJoined` are both
/// success for the caller; the others name why the insert matched no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
    Full,
    Inactive,
}

/// Persistence-layer predicates for listing requests. Built by the filter
/// resolver from human-readable names; `None` fields mean "filter absent".
#[derive(Debug, Default, Clone)]
pub struct RequestQuery {
    pub owner_id: Option<String>,
    pub game_id: Option<String>,
    pub participant_id: Option<String>,
    /// Matches requests whose tag set intersects this set.
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
}

#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn create(&self, request: &GameRequest) -> Result<GameRequest, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<GameRequest>, AppError>;
    /// Newest first.
    async fn list(&self, query: &RequestQuery) -> Result<Vec<GameRequest>, AppError>;
    async fn update(&self, request: &GameRequest) -> Result<GameRequest, AppError>;
    /// Membership check, capacity bound and active flag are evaluated in a
    /// single conditional insert so concurrent joins cannot overfill.
    async fn add_player(&self, request_id: &str, user_id: &str) -> Result<JoinOutcome, AppError>;
    /// Idempotent: removing a non-participant is a no-op.
    async fn remove_player(&self, request_id: &str, user_id: &str) -> Result<(), AppError>;
    /// Replaces the participant set in one transaction.
    async fn set_players(&self, request_id: &str, user_ids: &[String]) -> Result<(), AppError>;
    /// Participant user ids in join order.
    async fn list_players(&self, request_id: &str) -> Result<Vec<String>, AppError>;
}
