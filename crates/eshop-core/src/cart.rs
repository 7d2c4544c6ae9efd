//! # Shopping Cart
//!
//! The in-memory cart aggregate.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  UI Action                Transition              Effect                │
//! │  ─────────                ──────────              ──────                │
//! │  Click "Add to Cart" ───► add_item() ───────────► qty += n or insert    │
//! │  Change quantity ───────► update_quantity() ────► qty = n (n<1 removes) │
//! │  Click remove ──────────► remove_item() ────────► line deleted          │
//! │  Successful checkout ───► clear() ──────────────► all lines deleted     │
//! │                                                                         │
//! │  INVARIANT after every transition:                                      │
//! │    total_cents  == Σ(unit_price × quantity) over current lines          │
//! │    total_quantity == Σ(quantity) over current lines                     │
//! │    no line has quantity < 1                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are recomputed from the lines on every read. There is no stored
//! total that can drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{OrderItem, Product};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: reference back to the catalog
/// - Name, price, and image are frozen copies taken when the line was
///   created. The cart displays consistent data even if the catalog
///   changes underneath it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product id (catalog key).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    /// We lock in the price when the product enters the cart.
    pub unit_price_cents: i64,

    /// Image reference at time of adding (frozen).
    pub image: String,

    /// Quantity in cart. Never below 1.
    pub quantity: i64,

    /// When this line was created.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart line from a product snapshot and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            image: product.image.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

/// Converts a cart line into an order line item (for checkout).
impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        OrderItem {
            id: item.product_id.clone(),
            name: item.name.clone(),
            unit_price_cents: item.unit_price_cents,
            quantity: item.quantity,
            image: item.image.clone(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product increases
///   quantity)
/// - Quantity is always >= 1 (updating below 1 removes the line)
/// - Maximum distinct lines: [`MAX_CART_ITEMS`]
/// - Maximum quantity per line: [`MAX_ITEM_QUANTITY`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart.
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or increases quantity if already present.
    /// Quantities below 1 are treated as 1.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        let quantity = quantity.max(1);
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of a line exactly.
    ///
    /// ## Behavior
    /// - Quantity below 1 removes the line (caller-observable policy, not
    ///   a silent clamp to a zero-quantity line)
    /// - Product not in the cart: no-op, same as [`Cart::remove_item`]
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            self.remove_item(product_id);
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    /// Removes a line by product id. No-op if the product is not in the cart.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the cart total (recomputed from the lines).
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the line for a product, if present.
    pub fn line(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for presentation-layer responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total_cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
