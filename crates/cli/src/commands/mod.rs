//! CLI subcommands.

pub mod admin;
pub mod migrate;
pub mod seed;

use sqlx::PgPool;

use shinewell_server::config::{self, ConfigError};
use shinewell_server::db;

/// Errors shared by every command that talks to the database.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect using the same environment variables as the server.
pub async fn connect() -> Result<PgPool, ConnectError> {
    let (database_url, settings) = config::database_from_env()?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url, &settings).await?)
}
