//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! SHINEWELL_ADMIN_PASSWORD='...' shinewell admin create -e ops@shinewell.example -n "Ops Team"
//! ```

use shinewell_server::services::{AdminAuthService, AuthError};

use super::{ConnectError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Admin user already exists with email: {0}")]
    UserExists(String),

    #[error(transparent)]
    Auth(AuthError),
}

/// Create a new admin user with a password login.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<(), AdminError> {
    let pool = connect().await?;

    tracing::info!("Creating admin user: {}", email);
    let admin = AdminAuthService::new(&pool)
        .create_admin(email, name, password)
        .await
        .map_err(|e| match e {
            AuthError::AdminAlreadyExists => AdminError::UserExists(email.to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}",
        admin.id,
        admin.email
    );
    pool.close().await;
    Ok(())
}
