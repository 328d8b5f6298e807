//! Product repository for catalog operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shinewell_core::{NewProduct, Price, ProductId, Specifications};

use super::RepositoryError;
use crate::models::Product;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Columns selected for every product query.
pub(crate) const PRODUCT_COLUMNS: &str = r"
    id, name, description, image, category, price, stock_quantity,
    features, benefits, usage_instructions, warnings, tags,
    specifications, is_active, created_at, updated_at
";

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    image: String,
    category: Option<String>,
    price: Option<Price>,
    stock_quantity: Option<i32>,
    features: Vec<String>,
    benefits: Vec<String>,
    usage_instructions: Vec<String>,
    warnings: Vec<String>,
    tags: Vec<String>,
    specifications: serde_json::Value,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let specifications: Specifications =
            serde_json::from_value(row.specifications).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid product specifications: {e}"))
            })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            image: row.image,
            category: row.category,
            price: row.price,
            stock_quantity: row.stock_quantity,
            features: row.features,
            benefits: row.benefits,
            usage_instructions: row.usage_instructions,
            warnings: row.warnings,
            tags: row.tags,
            specifications,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Insert a validated product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    /// Returns `RepositoryError::DataCorruption` if the specifications cannot be encoded.
    pub async fn create(&self, product: &NewProduct) -> Result<ProductId, RepositoryError> {
        let specifications = serde_json::to_value(&product.specifications).map_err(|e| {
            RepositoryError::DataCorruption(format!("cannot encode specifications: {e}"))
        })?;

        let id: Uuid = sqlx::query_scalar(
            r"
            INSERT INTO shop.products (
                name, description, image, category, price, stock_quantity,
                features, benefits, usage_instructions, warnings, tags,
                specifications, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(&product.features)
        .bind(&product.benefits)
        .bind(&product.usage_instructions)
        .bind(&product.warnings)
        .bind(&product.tags)
        .bind(specifications)
        .bind(product.is_active)
        .fetch_one(self.pool)
        .await?;

        Ok(ProductId::new(id))
    }

    /// Delete a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete every product. Used by catalog reseeding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.products")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
