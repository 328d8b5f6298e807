//! Database maintenance handlers: status, export, clear and init.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::bulk::{self, DataExport};
use crate::diagnostics::{self, StatusContext, StatusReport};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Phrase that must be sent to clear all data.
pub const CLEAR_CONFIRMATION: &str = "CLEAR ALL DATA";

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    pub confirm: Option<String>,
}

/// GET /api/db/status - connection diagnostics.
///
/// Unlike other endpoints, failures are described in detail: the body is
/// always a status report and the HTTP status follows its outcome.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> (StatusCode, Json<StatusReport>) {
    let config = state.config();
    let context = StatusContext {
        database_uri: Some(config.database_url.expose_secret()),
        environment: &config.environment,
    };

    let report = diagnostics::check_status(state.pool(), context).await;
    (report.http_status(), Json(report))
}

/// GET /api/db/export - dump products, orders and customers.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn export(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<DataExport>, AppError> {
    let export = bulk::export_all(state.pool()).await?;
    tracing::info!(
        products = export.products.len(),
        orders = export.orders.len(),
        customers = export.customers.len(),
        "Data exported"
    );
    Ok(Json(export))
}

/// POST /api/db/clear - delete every order, customer and product.
///
/// Requires `{"confirm": "CLEAR ALL DATA"}`.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn clear(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    payload: Result<Json<ClearRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    if request.confirm.as_deref() != Some(CLEAR_CONFIRMATION) {
        return Err(AppError::BadRequest(format!(
            "Confirmation required: send {{\"confirm\": \"{CLEAR_CONFIRMATION}\"}}"
        )));
    }

    let cleared = bulk::clear_all(state.pool()).await?;
    tracing::warn!(
        admin_id = %admin.id,
        admin_email = %admin.email,
        orders = cleared.orders,
        customers = cleared.customers,
        products = cleared.products,
        "All shop data cleared"
    );

    Ok(Json(json!({
        "success": true,
        "message": "All data cleared successfully",
    })))
}

/// GET|POST /api/db/init - apply pending migrations.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn init(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Value>, AppError> {
    bulk::initialize(state.pool()).await?;
    tracing::info!("Database initialized");

    Ok(Json(json!({
        "success": true,
        "message": "Database initialized successfully",
    })))
}
