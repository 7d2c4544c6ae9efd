//! # Checkout Workflow
//!
//! Turns the current cart into a durable order.
//!
//! ## Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Preconditions   authenticated session? non-empty cart?              │
//! │       │             (rejection carries which one failed)                │
//! │       ▼                                                                 │
//! │  2. Snapshot        cart lines → order items at their frozen prices,    │
//! │       │             total recomputed from the lines                     │
//! │       ▼                                                                 │
//! │  3. Persist         single INSERT via the order repository              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. Clear cart      ONLY after the insert succeeded; on any failure     │
//! │                     the cart is untouched so the user can retry         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use crate::error::{CheckoutRejection, ClientError, ClientResult};
use crate::session::SessionManager;
use crate::state::CartState;
use eshop_core::{BillingInfo, Order, OrderDraft, OrderItem, OrderStatus};
use eshop_store::RecordStore;

/// Places an order for the signed-in user from the current cart.
///
/// The order is written with status `Completed` in one shot; there is no
/// intermediate pending state in this flow. The cart is cleared only once
/// the record is durable.
pub async fn place_order(
    store: &RecordStore,
    session: &SessionManager,
    cart: &CartState,
    billing_info: BillingInfo,
) -> ClientResult<Order> {
    let Some(current) = session.current() else {
        warn!("Checkout attempted without a session");
        return Err(ClientError::CheckoutRejected(CheckoutRejection::NotAuthenticated));
    };

    let (items, total_cents) = cart.with_cart(|c| {
        let items: Vec<OrderItem> = c.items.iter().map(OrderItem::from).collect();
        (items, c.total_cents())
    });

    if items.is_empty() {
        return Err(ClientError::CheckoutRejected(CheckoutRejection::EmptyCart));
    }

    let draft = OrderDraft {
        user_id: current.user_id.clone(),
        items,
        total_cents,
        billing_info,
        status: OrderStatus::Completed,
    };

    let order = store.orders().create(draft).await?;

    // The insert is durable; now the cart may go.
    cart.clear();

    info!(
        order_id = %order.id,
        user_id = %order.user_id,
        total_cents = order.total_cents,
        "Order placed"
    );

    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerStore;
    use eshop_core::catalog;
    use eshop_store::{StoreConfig, StoreError};
    use uuid::Uuid;

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

    fn temp_pointer() -> PointerStore {
        let path = std::env::temp_dir().join(format!("eshop-checkout-{}.json", Uuid::new_v4()));
        PointerStore::new(path)
    }

    async fn signed_in() -> (RecordStore, SessionManager) {
        let store = RecordStore::open(StoreConfig::in_memory()).await.unwrap();
        let mut session = SessionManager::new(store.clone(), temp_pointer());
        session
            .register("Jane", "jane@example.com", "hunter2!")
            .await
            .unwrap();
        (store, session)
    }

    /// Two catalog lines whose total is a known figure, for assertions.
    fn fill_cart(cart: &CartState) -> i64 {
        let products = catalog::all_products();
        cart.add_item(&products[0], 2).unwrap();
        cart.add_item(&products[1], 1).unwrap();
        products[0].price_cents * 2 + products[1].price_cents
    }

    #[tokio::test]
    async fn test_checkout_writes_order_and_clears_cart() {
        let (store, session) = signed_in().await;
        let cart = CartState::new();
        let expected_total = fill_cart(&cart);

        let order = place_order(&store, &session, &cart, billing()).await.unwrap();

        assert_eq!(order.total_cents, expected_total);
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.items.len(), 2);
        assert!(cart.is_empty());

        // And it is durable under the user's history
        let history = store.orders().get_by_user(&order.user_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, order.id);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_without_a_write() {
        let (store, session) = signed_in().await;
        let cart = CartState::new();

        let err = place_order(&store, &session, &cart, billing()).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::CheckoutRejected(CheckoutRejection::EmptyCart)
        ));

        let user_id = session.current().unwrap().user_id.clone();
        assert!(store.orders().get_by_user(&user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unauthenticated_checkout_is_rejected() {
        let store = RecordStore::open(StoreConfig::in_memory()).await.unwrap();
        let mut session = SessionManager::new(store.clone(), temp_pointer());
        session.restore().await.unwrap();

        let cart = CartState::new();
        fill_cart(&cart);

        let err = place_order(&store, &session, &cart, billing()).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::CheckoutRejected(CheckoutRejection::NotAuthenticated)
        ));

        // The cart survives the rejection
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_leaves_cart_intact() {
        let (store, session) = signed_in().await;
        let cart = CartState::new();
        fill_cart(&cart);

        // Closing the pool makes the insert fail
        store.close().await;

        let err = place_order(&store, &session, &cart, billing()).await.unwrap_err();
        assert!(matches!(err, ClientError::Store(StoreError::Unavailable(_))));
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_two_line_cart_totals_forty_five_dollars() {
        let (store, session) = signed_in().await;
        let cart = CartState::new();

        let widget = eshop_core::Product {
            id: "w-1".to_string(),
            name: "Widget".to_string(),
            price_cents: 1000,
            image: "widget.jpg".to_string(),
            category: "accessories".to_string(),
            description: "A widget".to_string(),
            rating: None,
            reviews: None,
        };
        let gadget = eshop_core::Product {
            id: "g-1".to_string(),
            name: "Gadget".to_string(),
            price_cents: 2500,
            image: "gadget.jpg".to_string(),
            category: "accessories".to_string(),
            description: "A gadget".to_string(),
            rating: None,
            reviews: None,
        };

        // 2 × $10.00 + 1 × $25.00 = $45.00
        cart.add_item(&widget, 2).unwrap();
        cart.add_item(&gadget, 1).unwrap();

        let order = place_order(&store, &session, &cart, billing()).await.unwrap();
        assert_eq!(order.total_cents, 4500);
        assert_eq!(eshop_core::Money::from_cents(order.total_cents).to_string(), "$45.00");
    }

    #[tokio::test]
    async fn test_repeat_checkouts_accumulate_history() {
        let (store, session) = signed_in().await;
        let cart = CartState::new();

        fill_cart(&cart);
        place_order(&store, &session, &cart, billing()).await.unwrap();

        fill_cart(&cart);
        place_order(&store, &session, &cart, billing()).await.unwrap();

        let user_id = session.current().unwrap().user_id.clone();
        let history = store.orders().get_by_user(&user_id).await.unwrap();
        assert_eq!(history.len(), 2);
    }
}
