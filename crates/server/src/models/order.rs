//! Wholesale order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shinewell_core::{CustomerContact, CustomerId, LineItem, OrderId, OrderStatus};

/// An order as stored and listed.
///
/// Contact fields are copied from the submission so the order keeps the
/// details it was placed with even after the customer record changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub store_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub products: Vec<LineItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An order ready to insert, linked to a resolved customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub contact: CustomerContact,
    pub items: Vec<LineItem>,
}

/// Ids produced by a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReceipt {
    pub customer_id: CustomerId,
    pub order_id: OrderId,
}
