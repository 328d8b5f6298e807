//! Database operations for the shop `PostgreSQL` database.
//!
//! ## Tables (schema `shop`)
//!
//! - `products` - Catalog entries (string lists as `TEXT[]`, specifications as `JSONB`)
//! - `customers` - One row per normalized email address
//! - `orders` - Submitted orders with `JSONB` line-item snapshots
//! - `admin_users` - Back-office accounts
//!
//! Sessions live in `tower_sessions.session`.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/`, embedded in the
//! binary as [`MIGRATOR`], and run via:
//! ```bash
//! shinewell migrate
//! ```
//! or `POST /api/db/init` from the back office.

pub mod admin_users;
pub mod bulk;
pub mod customers;
pub mod orders;
pub mod products;

use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

use crate::config::DatabaseSettings;

pub use admin_users::AdminUserRepository;
pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// SQLSTATE for `query_canceled`, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Applying embedded migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl RepositoryError {
    /// Whether the database could not be reached or refused the connection.
    #[must_use]
    pub fn is_connection_failure(&self) -> bool {
        match self {
            Self::Database(err) | Self::Migration(sqlx::migrate::MigrateError::Execute(err)) => {
                is_connection_error(err)
            }
            _ => false,
        }
    }

    /// Whether a statement was cancelled by the server-side timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some(QUERY_CANCELED)
            }
            _ => false,
        }
    }
}

/// Classify a sqlx error as a connection-level failure.
///
/// Covers pool acquisition timeouts, socket and TLS failures, and the
/// SQLSTATE classes raised while establishing a session (connection
/// exceptions, authentication failures, unknown database, server shutdown).
#[must_use]
pub fn is_connection_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_) => true,
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| {
            code.starts_with("08")
                || code.starts_with("28")
                || code == "3D000"
                || matches!(&*code, "57P01" | "57P02" | "57P03")
        }),
        _ => false,
    }
}

fn connect_options(
    database_url: &SecretString,
    settings: &DatabaseSettings,
) -> Result<PgConnectOptions, sqlx::Error> {
    let statement_timeout = format!("{}ms", settings.statement_timeout.as_millis());
    Ok(PgConnectOptions::from_str(database_url.expose_secret())?
        .options([("statement_timeout", statement_timeout)]))
}

fn pool_options(settings: &DatabaseSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
}

/// Create a `PostgreSQL` connection pool and open its first connection.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `settings` - Pool size and timeouts
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(
    database_url: &SecretString,
    settings: &DatabaseSettings,
) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(database_url, settings)?;
    pool_options(settings).connect_with(options).await
}

/// Create a pool that connects on first use.
///
/// Used when the database is down at startup so the server can still come up
/// and report the problem through the status endpoint.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL cannot be parsed.
pub fn create_lazy_pool(
    database_url: &SecretString,
    settings: &DatabaseSettings,
) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(database_url, settings)?;
    Ok(pool_options(settings).connect_lazy_with(options))
}
