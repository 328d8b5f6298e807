//! Catalog product handlers.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use shinewell_core::{ProductId, ProductSubmission};

use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

/// `?id=` query used by delete endpoints.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// GET /api/products - list every product, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// POST /api/products - add a catalog product.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    payload: Result<Json<ProductSubmission>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(submission) = payload?;
    let product = submission.validate()?;

    let id = ProductRepository::new(state.pool()).create(&product).await?;
    tracing::info!(product_id = %id, name = %product.name, "Product created");

    Ok(Json(json!({
        "success": true,
        "id": id,
        "message": "Product added successfully",
    })))
}

/// DELETE /api/products?id= - remove a product.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, AppError> {
    let raw_id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Product ID is required".to_string()))?;
    let id = ProductId::parse(raw_id.trim())
        .map_err(|_| AppError::BadRequest("Invalid product ID format".to_string()))?;

    match ProductRepository::new(state.pool()).delete(id).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => {
            return Err(AppError::NotFound("Product not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    }
    tracing::info!(product_id = %id, "Product deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Product deleted successfully",
    })))
}
