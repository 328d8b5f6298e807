//! Whole-database maintenance: export, clear and schema initialization.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use super::{CustomerRepository, MIGRATOR, OrderRepository, ProductRepository, RepositoryError};
use crate::models::{Customer, Order, Product};

/// Format version stamped on every export.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Full dump of the shop data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub export_date: DateTime<Utc>,
    pub version: &'static str,
}

/// Rows removed by [`clear_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClearedRows {
    pub orders: u64,
    pub customers: u64,
    pub products: u64,
}

/// Read every product, order and customer.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any query fails.
/// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
pub async fn export_all(pool: &PgPool) -> Result<DataExport, RepositoryError> {
    let products = ProductRepository::new(pool).list_all().await?;
    let orders = OrderRepository::new(pool).list_all().await?;
    let customers = CustomerRepository::new(pool).list_all().await?;

    Ok(DataExport {
        products,
        orders,
        customers,
        export_date: Utc::now(),
        version: EXPORT_VERSION,
    })
}

/// Delete every order, customer and product in one transaction.
///
/// Orders go first because they reference customers.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any delete fails; nothing is
/// removed in that case.
pub async fn clear_all(pool: &PgPool) -> Result<ClearedRows, RepositoryError> {
    let mut tx = pool.begin().await?;

    let orders = sqlx::query("DELETE FROM shop.orders")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let customers = sqlx::query("DELETE FROM shop.customers")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let products = sqlx::query("DELETE FROM shop.products")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    Ok(ClearedRows {
        orders,
        customers,
        products,
    })
}

/// Apply any pending embedded migrations. Safe to run repeatedly.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails to apply.
pub async fn initialize(pool: &PgPool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
