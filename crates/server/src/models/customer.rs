//! Wholesale customer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shinewell_core::{CustomerId, Email};

/// A customer record, created or refreshed by each order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub store_name: String,
    /// Number of orders referencing this customer. Only populated by listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
