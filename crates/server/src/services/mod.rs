//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Back-office password authentication
//! - `orders` - Order submission workflow and status changes

pub mod auth;
pub mod orders;

pub use auth::{AdminAuthService, AuthError};
pub use orders::{OrderStore, OrderWorkflowError, delete_order, submit_order, update_order_status};
