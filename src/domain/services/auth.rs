use std::sync::Arc;
use crate::domain::{models::auth::Claims, models::user::User, ports::UserRepository};
use crate::domain::services::credentials;
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use chrono::{Duration, Utc};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expire_hours: i64,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, config: &Config) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            expire_hours: config.token_expire_hours,
        }
    }

    /// Unknown user and wrong password both come back as `Unauthorized`;
    /// the response does not reveal which.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, User), AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let matches = credentials::verify(
            &user.password_hash,
            password,
            &user.salt,
            user.iterations as u32,
        )
        .map_err(|e| {
            // A malformed stored credential is a data-integrity fault on
            // our side, not a client error.
            tracing::error!("Stored credential for {} is malformed: {}", username, e);
            AppError::Internal
        })?;

        if !matches {
            return Err(AppError::Unauthorized);
        }

        let token = self.issue(&user.username)?;
        Ok((token, user))
    }

    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(self.expire_hours)).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}
