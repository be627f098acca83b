use file_system::get_database_path;
use std::env;

use crate::database_error::DatabaseError;

/// Returns the database URL in the format sqlite:///absolute/path/to/catalog.sqlite.
/// `DATABASE_URL` (also read from a `.env` file) takes precedence.
pub fn get_database_url() -> Result<String, DatabaseError> {
    dotenvy::dotenv().ok();
    if let Ok(env_url) = env::var("DATABASE_URL") {
        return Ok(env_url);
    }

    let db_path = get_database_path()
        .map_err(|e| DatabaseError::DbError(format!("Cannot resolve database path: {}", e)))?;

    Ok(format!("sqlite://{}", db_path.display()))
}
