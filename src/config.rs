use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub token_secret: String,
    pub token_expire_hours: i64,
    /// Lower bound on the iteration count recorded per user credential.
    pub hash_iterations: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            token_secret: env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set"),
            token_expire_hours: env::var("TOKEN_EXPIRE_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("TOKEN_EXPIRE_HOURS must be a number"),
            hash_iterations: env::var("HASH_ITERATIONS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("HASH_ITERATIONS must be a number"),
        }
    }
}
