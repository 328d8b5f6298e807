//! Database migration command.
//!
//! Applies the migrations embedded in the server crate
//! (`crates/server/migrations/`). Already-applied migrations are skipped, so
//! running it repeatedly is safe.

use shinewell_server::db::{RepositoryError, bulk};

use super::{ConnectError, connect};

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Migration error: {0}")]
    Migration(#[from] RepositoryError),
}

/// Run all pending migrations.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    bulk::initialize(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations complete!");
    Ok(())
}
