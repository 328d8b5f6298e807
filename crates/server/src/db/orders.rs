//! Order repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shinewell_core::{CustomerId, LineItem, OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::{NewOrder, Order};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Columns selected for every order query. The status enum is read as text.
pub(crate) const ORDER_COLUMNS: &str = r"
    id, customer_id, customer_name, store_name, address, phone, email,
    products, status::TEXT AS status, created_at, updated_at
";

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct OrderRow {
    id: Uuid,
    customer_id: Uuid,
    customer_name: String,
    store_name: String,
    address: String,
    phone: String,
    email: String,
    products: serde_json::Value,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let products: Vec<LineItem> = serde_json::from_value(row.products).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid line items on order {}: {e}", row.id))
        })?;
        let status: OrderStatus = row.status.parse().map_err(|_| {
            RepositoryError::DataCorruption(format!("invalid order status: {}", row.status))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            customer_name: row.customer_name,
            store_name: row.store_name,
            address: row.address,
            phone: row.phone,
            email: row.email,
            products,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    /// Returns `RepositoryError::DataCorruption` if the line items cannot be encoded.
    pub async fn insert(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let products = serde_json::to_value(&order.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("cannot encode line items: {e}"))
        })?;

        let id: Uuid = sqlx::query_scalar(
            r"
            INSERT INTO shop.orders (
                customer_id, customer_name, store_name, address, phone, email,
                products, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8::shop.order_status)
            RETURNING id
            ",
        )
        .bind(order.customer_id)
        .bind(&order.contact.name)
        .bind(&order.contact.store_name)
        .bind(&order.contact.address)
        .bind(&order.contact.phone)
        .bind(&order.contact.email)
        .bind(products)
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(OrderId::new(id))
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.orders ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop.orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Set the status of an order and stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shop.orders
            SET status = $2::shop.order_status, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
