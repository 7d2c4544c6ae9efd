//! # Order Repository
//!
//! Database operations for the `orders` collection.
//!
//! ## Storage Shape
//! Line items and billing info are written once at checkout and read back
//! whole, so they live as JSON text columns instead of child tables. The
//! `user_id` column carries a non-unique index for order-history scans and
//! deliberately no foreign key: an order may outlive its user.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use eshop_core::{BillingInfo, Order, OrderDraft, OrderItem, OrderStatus};

/// Repository for order records.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

/// Raw row shape; JSON columns are decoded into domain types afterwards.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    items: String,
    total_cents: i64,
    billing_info: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> = serde_json::from_str(&row.items)
            .map_err(|e| StoreError::Internal(format!("corrupt order items column: {}", e)))?;
        let billing_info: BillingInfo = serde_json::from_str(&row.billing_info)
            .map_err(|e| StoreError::Internal(format!("corrupt billing info column: {}", e)))?;

        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            items,
            total_cents: row.total_cents,
            billing_info,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Persists an order, assigning its id and creation timestamp.
    ///
    /// A single INSERT, so the record is either fully durable or the call
    /// fails — no partial writes.
    ///
    /// ## Errors
    /// [`StoreError::InvalidInput`] when the draft violates creation-time
    /// invariants (empty items, total not matching the line sum).
    pub async fn create(&self, draft: OrderDraft) -> StoreResult<Order> {
        draft
            .validate()
            .map_err(|e| StoreError::InvalidInput(e.to_string()))?;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: draft.user_id,
            items: draft.items,
            total_cents: draft.total_cents,
            billing_info: draft.billing_info,
            status: draft.status,
            created_at: Utc::now(),
        };

        let items_json = serde_json::to_string(&order.items)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        let billing_json = serde_json::to_string(&order.billing_info)
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        debug!(id = %order.id, user_id = %order.user_id, total = order.total_cents, "Inserting order");

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, items, total_cents, billing_info, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(&items_json)
        .bind(order.total_cents)
        .bind(&billing_json)
        .bind(order.status)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(order)
    }

    /// Point lookup by order id. Absent is `Ok(None)`, not an error.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, items, total_cents, billing_info, status, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Returns all orders for a user (secondary-index scan), newest first.
    /// No matches is an empty Vec, not an error.
    pub async fn get_by_user(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, items, total_cents, billing_info, status, created_at
            FROM orders
            WHERE user_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{RecordStore, StoreConfig};

    async fn test_store() -> RecordStore {
        RecordStore::open(StoreConfig::in_memory()).await.unwrap()
    }

    fn item(id: &str, unit_price_cents: i64, quantity: i64) -> OrderItem {
        OrderItem {
            id: id.to_string(),
            name: format!("Product {}", id),
            unit_price_cents,
            quantity,
            image: "product.jpg".to_string(),
        }
    }

    fn billing() -> BillingInfo {
        BillingInfo {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            address: "123 Main St".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
            country: "United States".to_string(),
            payment_method: "credit-card".to_string(),
        }
    }

    fn draft(user_id: &str, items: Vec<OrderItem>) -> OrderDraft {
        let total_cents = items.iter().map(|i| i.line_total_cents()).sum();
        OrderDraft {
            user_id: user_id.to_string(),
            items,
            total_cents,
            billing_info: billing(),
            status: OrderStatus::Completed,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_roundtrips() {
        let store = test_store().await;
        let orders = store.orders();

        let created = orders
            .create(draft("user-1", vec![item("1", 1000, 2), item("2", 2500, 1)]))
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.total_cents, 4500);

        let found = orders.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.items.len(), 2);
        assert_eq!(found.items, created.items);
        assert_eq!(found.billing_info, created.billing_info);
        assert_eq!(found.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_empty_items_rejected() {
        let store = test_store().await;

        let err = store
            .orders()
            .create(draft("user-1", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_total_mismatch_rejected() {
        let store = test_store().await;

        let mut d = draft("user-1", vec![item("1", 1000, 2)]);
        d.total_cents = 1999; // drifted from the line sum

        let err = store.orders().create(d).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_get_by_user_scans_only_that_user() {
        let store = test_store().await;
        let orders = store.orders();

        let a1 = orders
            .create(draft("user-a", vec![item("1", 1000, 1)]))
            .await
            .unwrap();
        let a2 = orders
            .create(draft("user-a", vec![item("2", 2500, 2)]))
            .await
            .unwrap();
        orders
            .create(draft("user-b", vec![item("3", 700, 1)]))
            .await
            .unwrap();

        let history = orders.get_by_user("user-a").await.unwrap();
        assert_eq!(history.len(), 2);

        let ids: Vec<&str> = history.iter().map(|o| o.id.as_str()).collect();
        assert!(ids.contains(&a1.id.as_str()));
        assert!(ids.contains(&a2.id.as_str()));
    }

    #[tokio::test]
    async fn test_absent_lookups_are_not_errors() {
        let store = test_store().await;

        assert!(store.orders().get_by_id("no-such-order").await.unwrap().is_none());
        assert!(store.orders().get_by_user("nobody").await.unwrap().is_empty());
    }
}
