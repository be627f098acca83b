pub mod database_error;
mod database_path;
pub mod models;
pub mod repository;

use std::{str::FromStr, sync::Arc};

use sqlx::{
    migrate,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite, SqlitePool,
};

use crate::database_error::DatabaseError;

/// Opens (creating if needed) the catalog database and brings its schema up to date.
pub async fn get_db_pool() -> Result<Arc<Pool<Sqlite>>, DatabaseError> {
    let db_url = database_path::get_database_url()?;
    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    run_migrations(&pool).await?;
    tracing::info!(url = %db_url, "Catalog database ready");
    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn setup_test_db() -> SqlitePool {
    // Create an in-memory database connection
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to the in-memory SQLite database");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
