//! Customer handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::CustomerRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Customer;
use crate::state::AppState;

/// GET /api/customers - list customers newest first with their order counts.
#[instrument(skip_all, fields(admin = %admin.email))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = CustomerRepository::new(state.pool())
        .list_with_order_counts()
        .await?;
    Ok(Json(customers))
}
