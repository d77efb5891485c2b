//! Lifecycle operations for game-session requests: creation from raw
//! names, populated reads, filtered listing, allow-list edits, and
//! capacity-bounded join/leave.
//!
//! This service performs no identity checks; the route layer decides who
//! may call which mutation and passes pre-authorized input.

use std::sync::Arc;

use tracing::error;

use crate::domain::models::game::Game;
use crate::domain::models::request::{GameRequest, NewRequestParams, PopulatedRequest};
use crate::domain::models::user::{User, UserView};
use crate::domain::ports::{
    GameRepository, JoinOutcome, RequestQuery, RequestRepository, UserRepository,
};
use crate::error::AppError;

/// Human-readable creation input; owner and game arrive as names and are
/// resolved here.
pub struct NewRequest {
    pub title: String,
    pub owner: String,
    pub game: String,
    pub platform: String,
    pub tags: Vec<String>,
    pub location: String,
    pub contact_info: String,
    pub max_players: i64,
}

/// Human-readable listing criteria. `None` means the criterion is absent.
#[derive(Debug, Default)]
pub struct RequestFilter {
    pub user: Option<String>,
    pub game: Option<String>,
    pub joined: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
}

/// The allow-list for edits: a key absent from this struct cannot be
/// patched, which is what keeps the owner immutable.
#[derive(Debug, Default)]
pub struct RequestPatch {
    pub title: Option<String>,
    pub game: Option<String>,
    pub platform: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub contact_info: Option<String>,
    pub max_players: Option<i64>,
    /// Usernames; each must resolve.
    pub current_players: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Result of resolving a filter. `NoMatch` is distinct from "filter
/// absent": a name was given but resolves to nothing, so the listing is
/// empty without ever querying.
enum FilterResolution {
    Query(RequestQuery),
    NoMatch,
}

pub struct RequestService {
    users: Arc<dyn UserRepository>,
    games: Arc<dyn GameRepository>,
    requests: Arc<dyn RequestRepository>,
}

impl RequestService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        games: Arc<dyn GameRepository>,
        requests: Arc<dyn RequestRepository>,
    ) -> Self {
        Self { users, games, requests }
    }

    /// Resolves the owner username and game name, then persists a new
    /// request with an empty participant set. Each resolution failure is
    /// tagged with the entity that did not resolve.
    pub async fn create_from_names(&self, input: NewRequest) -> Result<PopulatedRequest, AppError> {
        if input.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be blank".into()));
        }
        if input.max_players < 1 {
            return Err(AppError::Validation("maxPlayers must be at least 1".into()));
        }

        let owner = self
            .users
            .find_by_username(&input.owner)
            .await?
            .ok_or_else(|| AppError::NotFound("user".into()))?;
        let game = self
            .games
            .find_by_name(&input.game)
            .await?
            .ok_or_else(|| AppError::NotFound("game".into()))?;

        let request = GameRequest::new(NewRequestParams {
            title: input.title,
            user_id: owner.id.clone(),
            game_id: game.id.clone(),
            platform: input.platform,
            tags: input.tags,
            location: input.location,
            contact_info: input.contact_info,
            max_players: input.max_players,
        });

        let created = self.requests.create(&request).await?;

        Ok(PopulatedRequest::assemble(created, owner.into(), game, Vec::new()))
    }

    pub async fn get_populated(&self, id: &str) -> Result<PopulatedRequest, AppError> {
        let request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("request".into()))?;

        self.populate(request).await
    }

    /// Filtered listing, newest first. A filter name that does not resolve
    /// yields an empty result rather than an error.
    pub async fn list(&self, filter: RequestFilter) -> Result<Vec<PopulatedRequest>, AppError> {
        let query = match self.resolve_filter(&filter).await? {
            FilterResolution::NoMatch => return Ok(Vec::new()),
            FilterResolution::Query(query) => query,
        };

        let requests = self.requests.list(&query).await?;

        let mut populated = Vec::with_capacity(requests.len());
        for request in requests {
            populated.push(self.populate(request).await?);
        }
        Ok(populated)
    }

    /// Applies an allow-list patch. A `game` name must resolve before the
    /// update is applied; `current_players` usernames must all resolve and
    /// the resulting set must fit `max_players`.
    pub async fn edit(&self, id: &str, patch: RequestPatch) -> Result<PopulatedRequest, AppError> {
        let mut request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("request".into()))?;

        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(AppError::Validation("title must not be blank".into()));
            }
            request.title = title;
        }
        if let Some(game_name) = patch.game {
            let game = self
                .games
                .find_by_name(&game_name)
                .await?
                .ok_or_else(|| AppError::NotFound("game".into()))?;
            request.game_id = game.id;
        }
        if let Some(platform) = patch.platform {
            request.platform = platform;
        }
        if let Some(tags) = patch.tags {
            request.tags = tags;
        }
        if let Some(location) = patch.location {
            request.location = location;
        }
        if let Some(contact_info) = patch.contact_info {
            request.contact_info = contact_info;
        }
        if let Some(max_players) = patch.max_players {
            if max_players < 1 {
                return Err(AppError::Validation("maxPlayers must be at least 1".into()));
            }
            request.max_players = max_players;
        }
        if let Some(is_active) = patch.is_active {
            request.is_active = is_active;
        }

        // Resolve the replacement participant set before touching anything,
        // and hold the capacity invariant against the (possibly patched)
        // maximum.
        let new_players = match patch.current_players {
            Some(names) => {
                let mut ids = Vec::with_capacity(names.len());
                for name in &names {
                    let user = self
                        .users
                        .find_by_username(name)
                        .await?
                        .ok_or_else(|| AppError::NotFound("user".into()))?;
                    if !ids.contains(&user.id) {
                        ids.push(user.id);
                    }
                }
                if ids.len() as i64 > request.max_players {
                    return Err(AppError::Capacity);
                }
                Some(ids)
            }
            None => {
                let current = self.requests.list_players(id).await?;
                if current.len() as i64 > request.max_players {
                    return Err(AppError::Capacity);
                }
                None
            }
        };

        request.updated_at = chrono::Utc::now();
        let updated = self.requests.update(&request).await?;

        if let Some(ids) = new_players {
            self.requests.set_players(id, &ids).await?;
        }

        self.populate(updated).await
    }

    /// Idempotent join: a second join by the same user succeeds without
    /// growing the participant set. The capacity check and the append are
    /// one atomic statement in the repository.
    pub async fn join(&self, username: &str, request_id: &str) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("user".into()))?;
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("request".into()))?;

        match self.requests.add_player(&request.id, &user.id).await? {
            JoinOutcome::Joined | JoinOutcome::AlreadyJoined => Ok(()),
            JoinOutcome::Full => Err(AppError::Capacity),
            JoinOutcome::Inactive => {
                Err(AppError::Validation("request is no longer accepting players".into()))
            }
        }
    }

    /// Idempotent leave: leaving a request you are not in is a no-op.
    pub async fn leave(&self, username: &str, request_id: &str) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("user".into()))?;
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("request".into()))?;

        self.requests.remove_player(&request.id, &user.id).await
    }

    /// Maps human-readable filter names to persistence references. A name
    /// that fails to resolve short-circuits the whole listing to empty.
    async fn resolve_filter(&self, filter: &RequestFilter) -> Result<FilterResolution, AppError> {
        let mut query = RequestQuery::default();

        if let Some(username) = &filter.user {
            match self.users.find_by_username(username).await? {
                Some(user) => query.owner_id = Some(user.id),
                None => return Ok(FilterResolution::NoMatch),
            }
        }
        if let Some(username) = &filter.joined {
            match self.users.find_by_username(username).await? {
                Some(user) => query.participant_id = Some(user.id),
                None => return Ok(FilterResolution::NoMatch),
            }
        }
        if let Some(name) = &filter.game {
            match self.games.find_by_name(name).await? {
                Some(game) => query.game_id = Some(game.id),
                None => return Ok(FilterResolution::NoMatch),
            }
        }
        query.tags = filter.tags.clone();
        query.location = filter.location.clone();

        Ok(FilterResolution::Query(query))
    }

    /// Two-step fetch-and-attach: the request row, then its referenced
    /// owner, game and participants. Redaction happens here by assembling
    /// views that carry no credential fields.
    async fn populate(&self, request: GameRequest) -> Result<PopulatedRequest, AppError> {
        let owner = self.require_user(&request.user_id).await?;
        let game = self.require_game(&request.game_id).await?;

        let player_ids = self.requests.list_players(&request.id).await?;
        let mut players: Vec<UserView> = Vec::with_capacity(player_ids.len());
        for player_id in player_ids {
            players.push(self.require_user(&player_id).await?.into());
        }

        Ok(PopulatedRequest::assemble(request, owner.into(), game, players))
    }

    async fn require_user(&self, id: &str) -> Result<User, AppError> {
        self.users.find_by_id(id).await?.ok_or_else(|| {
            error!("Request references missing user {}", id);
            AppError::Internal
        })
    }

    async fn require_game(&self, id: &str) -> Result<Game, AppError> {
        self.games.find_by_id(id).await?.ok_or_else(|| {
            error!("Request references missing game {}", id);
            AppError::Internal
        })
    }
}
