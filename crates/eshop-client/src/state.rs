//! # Shared Cart State
//!
//! Thread-safe ownership of the in-memory [`Cart`] so UI handlers and the
//! checkout workflow can touch the same cart concurrently.
//!
//! ## Locking
//! Mutations are short and synchronous (the cart is pure in-memory state),
//! so a plain `Mutex` behind an `Arc` is enough. The lock is never held
//! across an `.await`.

use std::sync::{Arc, Mutex};

use eshop_core::{Cart, CartTotals, CoreResult, Product};

/// Shared, mutable cart handle. Cloning shares the same underlying cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Runs a read-only closure against the cart.
    pub fn with_cart<T>(&self, f: impl FnOnce(&Cart) -> T) -> T {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Runs a mutating closure against the cart.
    pub fn with_cart_mut<T>(&self, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    /// Adds a product, merging into an existing line if present.
    pub fn add_item(&self, product: &Product, quantity: i64) -> CoreResult<()> {
        self.with_cart_mut(|cart| cart.add_item(product, quantity))
    }

    /// Sets a line's quantity; below 1 removes the line.
    pub fn update_quantity(&self, product_id: &str, quantity: i64) -> CoreResult<()> {
        self.with_cart_mut(|cart| cart.update_quantity(product_id, quantity))
    }

    /// Removes a line. Absent lines are a no-op.
    pub fn remove_item(&self, product_id: &str) {
        self.with_cart_mut(|cart| cart.remove_item(product_id));
    }

    /// Empties the cart.
    pub fn clear(&self) {
        self.with_cart_mut(|cart| cart.clear());
    }

    /// The derived totals snapshot.
    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| CartTotals::from(cart))
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.with_cart(|cart| cart.is_empty())
    }
}
