//! Order submission and lifecycle against a real `PostgreSQL` database.

#![allow(clippy::unwrap_used)]

use sqlx::PgPool;

use shinewell_core::{Email, OrderId, OrderStatus, ProductId};
use shinewell_integration_tests::sample_order;
use shinewell_server::db::{CustomerRepository, OrderRepository, ProductRepository, RepositoryError};
use shinewell_server::services::{OrderWorkflowError, delete_order, submit_order, update_order_status};

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_new_email_creates_customer_and_order(pool: PgPool) {
    let receipt = submit_order(&pool, sample_order("dana@cornermart.com", "Corner Mart"))
        .await
        .unwrap();

    assert_eq!(CustomerRepository::new(&pool).count().await.unwrap(), 1);
    let order = OrderRepository::new(&pool)
        .get_by_id(receipt.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.customer_id, receipt.customer_id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.products[0].quantity, 2);
    assert!(order.updated_at.is_none());
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_seen_email_refreshes_customer(pool: PgPool) {
    let first = submit_order(&pool, sample_order("dana@cornermart.com", "Corner Mart"))
        .await
        .unwrap();
    let second = submit_order(&pool, sample_order("  DANA@cornermart.com", "Harbor Mart"))
        .await
        .unwrap();

    assert_eq!(first.customer_id, second.customer_id);
    let customers = CustomerRepository::new(&pool);
    assert_eq!(customers.count().await.unwrap(), 1);

    let email = Email::parse("dana@cornermart.com").unwrap();
    let customer = customers.get_by_email(&email).await.unwrap().unwrap();
    assert_eq!(customer.store_name, "Harbor Mart");

    let listed = customers.list_with_order_counts().await.unwrap();
    assert_eq!(listed[0].orders_count, Some(2));
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_submissions_share_one_customer(pool: PgPool) {
    let (a, b) = tokio::join!(
        submit_order(&pool, sample_order("rush@cornermart.com", "Corner Mart")),
        submit_order(&pool, sample_order("rush@cornermart.com", "Corner Mart")),
    );

    assert_eq!(a.unwrap().customer_id, b.unwrap().customer_id);
    assert_eq!(CustomerRepository::new(&pool).count().await.unwrap(), 1);
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_status_update(pool: PgPool) {
    let receipt = submit_order(&pool, sample_order("dana@cornermart.com", "Corner Mart"))
        .await
        .unwrap();
    let id = receipt.order_id.to_string();

    update_order_status(&pool, &id, "completed").await.unwrap();
    let order = OrderRepository::new(&pool)
        .get_by_id(receipt.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert!(order.updated_at.is_some());

    let err = update_order_status(&pool, &id, "shipped").await.unwrap_err();
    assert!(matches!(err, OrderWorkflowError::InvalidStatus));

    let unknown = OrderId::generate().to_string();
    let err = update_order_status(&pool, &unknown, "cancelled")
        .await
        .unwrap_err();
    assert!(matches!(err, OrderWorkflowError::NotFound));
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_missing_rows_is_not_found(pool: PgPool) {
    let err = delete_order(&pool, &OrderId::generate().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, OrderWorkflowError::NotFound));

    let err = ProductRepository::new(&pool)
        .delete(ProductId::generate())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}
