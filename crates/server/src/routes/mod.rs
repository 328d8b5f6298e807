//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (database ping)
//!
//! # Public
//! GET    /api/products         - Product listing
//! POST   /api/orders           - Submit an order (rate limited)
//! POST   /api/contact          - Business inquiry (rate limited)
//!
//! # Admin session
//! POST /api/admin/login        - Password login (rate limited)
//! POST /api/admin/logout       - Logout
//! GET  /api/admin/session      - Current admin
//!
//! # Admin (requires auth)
//! POST   /api/products         - Add product
//! DELETE /api/products?id=     - Delete product
//! GET    /api/orders           - Order listing
//! PUT    /api/orders           - Change order status
//! DELETE /api/orders?id=       - Delete order
//! GET    /api/customers        - Customer listing with order counts
//! GET    /api/db/status        - Database diagnostics
//! GET    /api/db/export        - Export all data
//! POST   /api/db/clear         - Delete all data (confirmed)
//! GET|POST /api/db/init        - Apply migrations
//! ```

pub mod auth;
pub mod contact;
pub mod customers;
pub mod db;
pub mod orders;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::middleware::{login_rate_limiter, submission_rate_limiter};
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Public submissions, rate limited per client IP.
fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/api/orders", post(orders::create))
        .route("/api/contact", post(contact::submit))
        .layer(submission_rate_limiter())
}

/// Admin session routes.
fn admin_session_routes() -> Router<AppState> {
    let login = Router::new()
        .route("/login", post(auth::login))
        .layer(login_rate_limiter());

    Router::new()
        .merge(login)
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::current))
}

/// Database maintenance routes.
fn db_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(db::status))
        .route("/export", get(db::export))
        .route("/clear", post(db::clear))
        .route("/init", get(db::init).post(db::init))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route(
            "/api/products",
            get(products::list)
                .post(products::create)
                .delete(products::delete),
        )
        .route(
            "/api/orders",
            get(orders::list).put(orders::update).delete(orders::delete),
        )
        .route("/api/customers", get(customers::list))
        .merge(submission_routes())
        .nest("/api/admin", admin_session_routes())
        .nest("/api/db", db_routes())
}
