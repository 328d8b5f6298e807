//! Shinewell Core - Shared types and validators.
//!
//! This crate provides the domain types used across all Shinewell components:
//! - `server` - Catalog, order and admin JSON API
//! - `cli` - Command-line tools for migrations, seeding and admin users
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Database encoding is available behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`validation`] - Order and product submission validators

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{
    CustomerContact, LineItem, NewProduct, OrderSubmission, ProductSubmission, Specifications,
    ValidatedOrder, ValidationError,
};
