//! Order submission workflow.
//!
//! A submission resolves its customer first (insert or refresh by normalized
//! email) and only then inserts the order, linked to the customer's durable
//! id. The order insert is never attempted if the customer step fails.

use std::future::Future;

use sqlx::PgPool;
use thiserror::Error;

use shinewell_core::{CustomerContact, CustomerId, OrderId, OrderStatus, ValidatedOrder};

use crate::db::{CustomerRepository, OrderRepository, RepositoryError};
use crate::models::{NewOrder, OrderReceipt};

/// Persistence operations the order workflow depends on.
pub trait OrderStore {
    /// Insert or refresh the customer keyed by `contact.email`, returning its id.
    fn upsert_customer(
        &self,
        contact: &CustomerContact,
    ) -> impl Future<Output = Result<CustomerId, RepositoryError>> + Send;

    /// Insert a pending order.
    fn insert_order(
        &self,
        order: &NewOrder,
    ) -> impl Future<Output = Result<OrderId, RepositoryError>> + Send;

    /// Set an order's status. `RepositoryError::NotFound` if the id is unknown.
    fn set_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete an order. `RepositoryError::NotFound` if the id is unknown.
    fn remove_order(&self, id: OrderId) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

impl OrderStore for PgPool {
    async fn upsert_customer(&self, contact: &CustomerContact) -> Result<CustomerId, RepositoryError> {
        CustomerRepository::new(self).upsert(contact).await
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        OrderRepository::new(self).insert(order).await
    }

    async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> Result<(), RepositoryError> {
        OrderRepository::new(self).update_status(id, status).await
    }

    async fn remove_order(&self, id: OrderId) -> Result<(), RepositoryError> {
        OrderRepository::new(self).delete(id).await
    }
}

/// Errors from order status changes and deletions.
#[derive(Debug, Error)]
pub enum OrderWorkflowError {
    #[error("Invalid order ID format")]
    InvalidOrderId,
    #[error("Invalid status value")]
    InvalidStatus,
    #[error("Order not found")]
    NotFound,
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for OrderWorkflowError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// Persist a validated order: resolve the customer, then insert the order.
///
/// # Errors
///
/// Returns the repository error from whichever step failed.
#[tracing::instrument(skip_all, fields(items = order.items.len()))]
pub async fn submit_order<S: OrderStore + Sync>(
    store: &S,
    order: ValidatedOrder,
) -> Result<OrderReceipt, RepositoryError> {
    let customer_id = store.upsert_customer(&order.contact).await?;

    let new_order = NewOrder {
        customer_id,
        contact: order.contact,
        items: order.items,
    };
    let order_id = store.insert_order(&new_order).await?;

    tracing::info!(
        customer_id = %customer_id,
        order_id = %order_id,
        items = new_order.items.len(),
        "Order created"
    );

    Ok(OrderReceipt {
        customer_id,
        order_id,
    })
}

/// Change the status of an order identified by its string id.
///
/// # Errors
///
/// Returns `InvalidOrderId` or `InvalidStatus` for malformed input,
/// `NotFound` if no order matched, or the underlying repository error.
pub async fn update_order_status<S: OrderStore + Sync>(
    store: &S,
    id: &str,
    status: &str,
) -> Result<OrderStatus, OrderWorkflowError> {
    let id = OrderId::parse(id).map_err(|_| OrderWorkflowError::InvalidOrderId)?;
    let status: OrderStatus = status
        .parse()
        .map_err(|_| OrderWorkflowError::InvalidStatus)?;

    store.set_order_status(id, status).await?;
    tracing::info!(order_id = %id, status = %status, "Order status updated");
    Ok(status)
}

/// Delete an order identified by its string id.
///
/// # Errors
///
/// Returns `InvalidOrderId` for a malformed id, `NotFound` if no order
/// matched, or the underlying repository error.
pub async fn delete_order<S: OrderStore + Sync>(
    store: &S,
    id: &str,
) -> Result<(), OrderWorkflowError> {
    let id = OrderId::parse(id).map_err(|_| OrderWorkflowError::InvalidOrderId)?;

    store.remove_order(id).await?;
    tracing::info!(order_id = %id, "Order deleted");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde_json::json;
    use shinewell_core::{Email, OrderSubmission};

    use super::*;

    #[derive(Debug, Clone)]
    struct StoredOrder {
        order: NewOrder,
        status: OrderStatus,
    }

    /// In-memory store keyed like the database: one customer per email.
    #[derive(Default)]
    struct MemoryStore {
        customers: Mutex<HashMap<Email, (CustomerId, CustomerContact)>>,
        orders: Mutex<HashMap<OrderId, StoredOrder>>,
        fail_upsert: bool,
    }

    impl OrderStore for MemoryStore {
        async fn upsert_customer(
            &self,
            contact: &CustomerContact,
        ) -> Result<CustomerId, RepositoryError> {
            if self.fail_upsert {
                return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
            }
            let mut customers = self.customers.lock().unwrap();
            let entry = customers
                .entry(contact.email.clone())
                .or_insert_with(|| (CustomerId::generate(), contact.clone()));
            entry.1 = contact.clone();
            Ok(entry.0)
        }

        async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
            let id = OrderId::generate();
            self.orders.lock().unwrap().insert(
                id,
                StoredOrder {
                    order: order.clone(),
                    status: OrderStatus::Pending,
                },
            );
            Ok(id)
        }

        async fn set_order_status(
            &self,
            id: OrderId,
            status: OrderStatus,
        ) -> Result<(), RepositoryError> {
            let mut orders = self.orders.lock().unwrap();
            let stored = orders.get_mut(&id).ok_or(RepositoryError::NotFound)?;
            stored.status = status;
            Ok(())
        }

        async fn remove_order(&self, id: OrderId) -> Result<(), RepositoryError> {
            self.orders
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepositoryError::NotFound)
        }
    }

    impl MemoryStore {
        fn customer_count(&self) -> usize {
            self.customers.lock().unwrap().len()
        }

        fn order_count(&self) -> usize {
            self.orders.lock().unwrap().len()
        }

        fn order(&self, id: OrderId) -> StoredOrder {
            self.orders.lock().unwrap().get(&id).cloned().unwrap()
        }

        fn customer(&self, email: &str) -> CustomerContact {
            let email = Email::parse(email).unwrap();
            self.customers.lock().unwrap().get(&email).unwrap().1.clone()
        }
    }

    fn submission(email: &str, store_name: &str) -> ValidatedOrder {
        let raw = json!({
            "customerName": "Dana Reyes",
            "storeName": store_name,
            "address": "12 Harbor Rd",
            "phone": "555-0101",
            "email": email,
            "products": [{"productId": "p1", "productName": "Glass Cleaner", "quantity": 2}]
        });
        serde_json::from_value::<OrderSubmission>(raw)
            .unwrap()
            .validate()
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_email_creates_customer_and_order() {
        let store = MemoryStore::default();
        let receipt = submit_order(&store, submission("dana@cornermart.com", "Corner Mart"))
            .await
            .unwrap();

        assert_eq!(store.customer_count(), 1);
        assert_eq!(store.order_count(), 1);
        let stored = store.order(receipt.order_id);
        assert_eq!(stored.order.customer_id, receipt.customer_id);
        assert_eq!(stored.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_seen_email_reuses_customer_and_refreshes_fields() {
        let store = MemoryStore::default();
        let first = submit_order(&store, submission("dana@cornermart.com", "Corner Mart"))
            .await
            .unwrap();
        let second = submit_order(&store, submission("dana@cornermart.com", "Harbor Mart"))
            .await
            .unwrap();

        assert_eq!(store.customer_count(), 1);
        assert_eq!(store.order_count(), 2);
        assert_eq!(first.customer_id, second.customer_id);
        assert_ne!(first.order_id, second.order_id);
        assert_eq!(store.customer("dana@cornermart.com").store_name, "Harbor Mart");
    }

    #[tokio::test]
    async fn test_email_casing_and_whitespace_share_customer() {
        let store = MemoryStore::default();
        let a = submit_order(&store, submission("Dana@CornerMart.com", "Corner Mart"))
            .await
            .unwrap();
        let b = submit_order(&store, submission("  dana@cornermart.COM ", "Corner Mart"))
            .await
            .unwrap();

        assert_eq!(a.customer_id, b.customer_id);
        assert_eq!(store.customer_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_upsert_skips_order_insert() {
        let store = MemoryStore {
            fail_upsert: true,
            ..MemoryStore::default()
        };
        let err = submit_order(&store, submission("dana@cornermart.com", "Corner Mart"))
            .await
            .unwrap_err();

        assert!(err.is_connection_failure());
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = MemoryStore::default();
        let receipt = submit_order(&store, submission("dana@cornermart.com", "Corner Mart"))
            .await
            .unwrap();

        let status = update_order_status(&store, &receipt.order_id.to_string(), "completed")
            .await
            .unwrap();
        assert_eq!(status, OrderStatus::Completed);
        assert_eq!(store.order(receipt.order_id).status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_update_status_rejects_unknown_status() {
        let store = MemoryStore::default();
        let receipt = submit_order(&store, submission("dana@cornermart.com", "Corner Mart"))
            .await
            .unwrap();

        let err = update_order_status(&store, &receipt.order_id.to_string(), "shipped")
            .await
            .unwrap_err();
        assert!(matches!(err, OrderWorkflowError::InvalidStatus));
        assert_eq!(store.order(receipt.order_id).status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_status_rejects_bad_id() {
        let store = MemoryStore::default();
        let err = update_order_status(&store, "12345", "completed")
            .await
            .unwrap_err();
        assert!(matches!(err, OrderWorkflowError::InvalidOrderId));
        assert_eq!(err.to_string(), "Invalid order ID format");
    }

    #[tokio::test]
    async fn test_update_status_unknown_order() {
        let store = MemoryStore::default();
        let err = update_order_status(&store, &OrderId::generate().to_string(), "cancelled")
            .await
            .unwrap_err();
        assert!(matches!(err, OrderWorkflowError::NotFound));
        assert_eq!(err.to_string(), "Order not found");
    }

    #[tokio::test]
    async fn test_delete_order() {
        let store = MemoryStore::default();
        let receipt = submit_order(&store, submission("dana@cornermart.com", "Corner Mart"))
            .await
            .unwrap();

        delete_order(&store, &receipt.order_id.to_string()).await.unwrap();
        assert_eq!(store.order_count(), 0);

        let err = delete_order(&store, &receipt.order_id.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, OrderWorkflowError::NotFound));
    }
}
