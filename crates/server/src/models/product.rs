//! Catalog product.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shinewell_core::{Price, ProductId, Specifications};

/// A catalog product as stored and listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Rows created before category became mandatory may have none.
    pub category: Option<String>,
    pub price: Option<Price>,
    pub stock_quantity: Option<i32>,
    pub features: Vec<String>,
    pub benefits: Vec<String>,
    pub usage_instructions: Vec<String>,
    pub warnings: Vec<String>,
    pub tags: Vec<String>,
    pub specifications: Specifications,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
