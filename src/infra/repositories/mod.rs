pub mod sqlite_game_repo;
pub mod sqlite_request_repo;
pub mod sqlite_user_repo;

use crate::error::AppError;

/// Translates a driver unique-violation into a field-specific
/// `AppError::Duplicate` so the boundary can say *which* field is taken.
/// SQLite names the violated column in the error message
/// ("UNIQUE constraint failed: users.username").
pub(crate) fn map_unique(e: sqlx::Error, fields: &[(&str, &str)]) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            let message = db_err.message().to_string();
            for (needle, field) in fields {
                if message.contains(needle) {
                    return AppError::Duplicate((*field).to_string());
                }
            }
        }
    }
    AppError::Database(e)
}
