//! Customer repository.
//!
//! Customers are keyed by normalized email. The upsert is a single
//! `INSERT ... ON CONFLICT` statement so concurrent submissions for the same
//! address converge on one row.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use shinewell_core::{CustomerContact, CustomerId, Email};

use super::RepositoryError;
use crate::models::Customer;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` customer queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    address: String,
    store_name: String,
    orders_count: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            name: row.name,
            email,
            phone: row.phone,
            address: row.address,
            store_name: row.store_name,
            orders_count: row.orders_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a customer or refresh the existing one with the same email.
    ///
    /// Returns the durable id of the row, whether it was inserted or matched.
    /// `created_at` is only set on insert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert(&self, contact: &CustomerContact) -> Result<CustomerId, RepositoryError> {
        let id: Uuid = sqlx::query_scalar(
            r"
            INSERT INTO shop.customers (name, email, phone, address, store_name)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO UPDATE
            SET name = EXCLUDED.name,
                phone = EXCLUDED.phone,
                address = EXCLUDED.address,
                store_name = EXCLUDED.store_name,
                updated_at = now()
            RETURNING id
            ",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.address)
        .bind(&contact.store_name)
        .fetch_one(self.pool)
        .await?;

        Ok(CustomerId::new(id))
    }

    /// List customers newest first, with the number of orders each has placed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_with_order_counts(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r"
            SELECT c.id, c.name, c.email, c.phone, c.address, c.store_name,
                   COUNT(o.id) AS orders_count,
                   c.created_at, c.updated_at
            FROM shop.customers c
            LEFT JOIN shop.orders o ON o.customer_id = c.id
            GROUP BY c.id
            ORDER BY c.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List customers newest first, without order counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r"
            SELECT id, name, email, phone, address, store_name,
                   NULL::BIGINT AS orders_count,
                   created_at, updated_at
            FROM shop.customers
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Look up a customer by normalized email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r"
            SELECT id, name, email, phone, address, store_name,
                   NULL::BIGINT AS orders_count,
                   created_at, updated_at
            FROM shop.customers
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Count customer rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shop.customers")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
