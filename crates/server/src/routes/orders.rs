//! Order handlers.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use shinewell_core::OrderSubmission;

use super::products::IdQuery;
use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::services::{delete_order, submit_order, update_order_status};
use crate::state::AppState;

/// Body of a status change.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// GET /api/orders - list every order, newest first.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// POST /api/orders - submit an order from the public site.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<OrderSubmission>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(submission) = payload?;
    let order = submission.validate()?;

    let receipt = submit_order(state.pool(), order).await?;

    Ok(Json(json!({
        "success": true,
        "id": receipt.order_id,
        "message": "Order created successfully",
    })))
}

/// PUT /api/orders - change an order's status.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = payload?;
    let (Some(id), Some(status)) = (
        body.id.filter(|s| !s.trim().is_empty()),
        body.status.filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(AppError::BadRequest(
            "Order ID and status are required".to_string(),
        ));
    };

    update_order_status(state.pool(), id.trim(), status.trim()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Order updated successfully",
    })))
}

/// DELETE /api/orders?id= - remove an order.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, AppError> {
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Order ID is required".to_string()))?;

    delete_order(state.pool(), id.trim()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Order deleted successfully",
    })))
}
