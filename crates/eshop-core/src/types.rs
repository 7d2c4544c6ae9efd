//! # Domain Types
//!
//! Core domain types used throughout EShop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │      User       │   │      Order      │   │    Product      │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id             │        │
//! │  │  email (unique) │   │  user_id        │   │  name           │        │
//! │  │  password_hash  │   │  items/total    │   │  price_cents    │        │
//! │  │  created_at     │   │  billing/status │   │  category       │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  Durable (record store): User, Order                                    │
//! │  Static (catalog):       Product, Category                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Order line items freeze product data (name, unit price, image ref) at
//! checkout time. Orders stay readable even if the catalog changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// User
// =============================================================================

/// A registered account in the record store.
///
/// ## Invariants
/// - `email` is stored lower-cased and is unique across the collection
/// - `password_hash` is an argon2id PHC string; the plaintext is never stored
/// - Records are immutable after creation (no profile-edit API)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name chosen at registration.
    pub name: String,

    /// Email address, lower-cased (the unique lookup key).
    pub email: String,

    /// Salted password hash (argon2id PHC string).
    pub password_hash: String,

    /// When the account was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// The full lifecycle is declared for forward compatibility, but checkout
/// writes orders as `Completed` directly and no transition API exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order received, not yet processed.
    Pending,
    /// Order is being prepared.
    Processing,
    /// Order has been fulfilled.
    Completed,
    /// Order was cancelled.
    Cancelled,
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses the snapshot pattern to freeze product data at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product id at time of purchase.
    pub id: String,

    /// Product name at time of purchase (frozen).
    pub name: String,

    /// Unit price in cents at time of purchase (frozen).
    pub unit_price_cents: i64,

    /// Quantity purchased.
    pub quantity: i64,

    /// Product image reference at time of purchase (frozen).
    pub image: String,
}

impl OrderItem {
    /// Returns the line total (unit price × quantity).
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Billing Info
// =============================================================================

/// Billing and shipping details captured at checkout.
///
/// Fields are supplied verbatim by the caller; field-level form validation
/// is a presentation concern and happens before this type is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingInfo {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    /// Payment method label (e.g. "credit-card"). No processing happens.
    pub payment_method: String,
}

// =============================================================================
// Order
// =============================================================================

/// A durable order record.
///
/// ## Invariants
/// - `items` is non-empty at creation
/// - `total_cents` equals the sum of line totals at creation time
/// - Immutable after creation in this scope
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The purchasing user's id. No enforced foreign key: an order may
    /// outlive its user (orphaned reference, by design).
    pub user_id: String,

    /// Snapshot of the cart lines at checkout.
    pub items: Vec<OrderItem>,

    /// Order total in cents (pre-tax/shipping).
    pub total_cents: i64,

    /// Billing details as entered at checkout.
    pub billing_info: BillingInfo,

    pub status: OrderStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// An order before the store assigns its id and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total_cents: i64,
    pub billing_info: BillingInfo,
    pub status: OrderStatus,
}

impl OrderDraft {
    /// Checks creation-time invariants: non-empty items and a total that
    /// matches the sum of line totals.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::Empty {
                field: "items".to_string(),
            });
        }

        let computed: i64 = self.items.iter().map(|i| i.line_total_cents()).sum();
        if computed != self.total_cents {
            return Err(ValidationError::TotalMismatch {
                declared: self.total_cents,
                computed,
            });
        }

        Ok(())
    }
}

// =============================================================================
// Catalog Types
// =============================================================================

/// A product in the static catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name shown in listings and carts.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Image asset reference.
    pub image: String,

    /// Category id this product belongs to.
    pub category: String,

    pub description: String,

    /// Average review rating, when the product has reviews.
    pub rating: Option<f64>,

    /// Number of reviews behind the rating.
    pub reviews: Option<u32>,
}

impl Product {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, unit_price_cents: i64, quantity: i64) -> OrderItem {
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

    #[test]
    fn test_line_total() {
        assert_eq!(line("1", 1000, 2).line_total_cents(), 2000);
    }

    #[test]
    fn test_draft_validates_items_and_total() {
        let draft = OrderDraft {
            user_id: "u1".to_string(),
            items: vec![line("1", 1000, 2), line("2", 2500, 1)],
            total_cents: 4500,
            billing_info: billing(),
            status: OrderStatus::Completed,
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_rejects_empty_items() {
        let draft = OrderDraft {
            user_id: "u1".to_string(),
            items: vec![],
            total_cents: 0,
            billing_info: billing(),
            status: OrderStatus::Completed,
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn test_draft_rejects_total_drift() {
        let draft = OrderDraft {
            user_id: "u1".to_string(),
            items: vec![line("1", 1000, 2)],
            total_cents: 1999,
            billing_info: billing(),
            status: OrderStatus::Completed,
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_order_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
