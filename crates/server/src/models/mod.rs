//! Domain models returned by the API.
//!
//! Every entity serializes with camelCase field names and exposes its id as
//! `_id`, the shape the storefront and back-office clients consume.

pub mod admin;
pub mod customer;
pub mod order;
pub mod product;

pub use admin::{AdminUser, CurrentAdmin, session_keys};
pub use customer::Customer;
pub use order::{NewOrder, Order, OrderReceipt};
pub use product::Product;
