//! Admin login, logout and session lookup.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::{RequireAdmin, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::AdminAuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/admin/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let admin = match AdminAuthService::new(state.pool()).login(&email, &password).await {
        Ok(admin) => admin,
        Err(e) => {
            tracing::warn!(email = %email, error = %e, "Admin login failed");
            return Err(e.into());
        }
    };

    let current = CurrentAdmin::from(&admin);
    set_current_admin(&session, &current).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to store admin session");
        AppError::Internal(format!("session error: {e}"))
    })?;
    tracing::info!(admin_id = %current.id, "Admin logged in");

    Ok(Json(json!({ "success": true, "admin": current })))
}

/// POST /api/admin/logout
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Json<Value>, AppError> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/admin/session
pub async fn current(RequireAdmin(admin): RequireAdmin) -> Json<Value> {
    Json(json!({ "admin": admin }))
}
