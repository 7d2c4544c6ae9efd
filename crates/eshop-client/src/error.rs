//! # Client Error Type
//!
//! The error taxonomy the presentation layer sees.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in EShop                                  │
//! │                                                                         │
//! │  StoreError (eshop-store)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (this module)                                              │
//! │  ├── InvalidCredentials  ← deliberately generic (anti-enumeration)      │
//! │  ├── AlreadyExists       ← registration duplicate, user-correctable     │
//! │  ├── CheckoutRejected    ← precondition failure, reason distinguished   │
//! │  └── Store(..)           ← everything else, terminal for that call      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  user_message() → one notification category, no internal detail         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retry policy exists: every storage failure is terminal for its call.

use thiserror::Error;

use eshop_core::CoreError;
use eshop_store::StoreError;

/// Why a checkout was refused before any write was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutRejection {
    /// No authenticated session.
    NotAuthenticated,
    /// The cart has no lines.
    EmptyCart,
}

impl std::fmt::Display for CheckoutRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutRejection::NotAuthenticated => write!(f, "not authenticated"),
            CheckoutRejection::EmptyCart => write!(f, "cart is empty"),
        }
    }
}

/// Client-facing errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Login failed. Intentionally does not say whether the email exists
    /// or the password was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already has an account. Distinct
    /// from `InvalidCredentials` and user-visible as such.
    #[error("An account with this email already exists")]
    AlreadyExists,

    /// Checkout precondition failure; no order was written.
    #[error("Checkout rejected: {0}")]
    CheckoutRejected(CheckoutRejection),

    /// Cart transition failure (quantity/line limits).
    #[error(transparent)]
    Cart(#[from] CoreError),

    /// Record store failure, surfaced as-is.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClientError {
    /// A user-facing message with no raw internal detail.
    ///
    /// Each failure maps to exactly one notification; store internals are
    /// logged at the call site, never shown.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::InvalidCredentials => "Invalid email or password".to_string(),
            ClientError::AlreadyExists => {
                "An account with this email already exists".to_string()
            }
            ClientError::CheckoutRejected(CheckoutRejection::NotAuthenticated) => {
                "Please log in to place your order".to_string()
            }
            ClientError::CheckoutRejected(CheckoutRejection::EmptyCart) => {
                "Your cart is empty".to_string()
            }
            ClientError::Cart(e) => e.to_string(),
            ClientError::Store(StoreError::Unavailable(_)) => {
                "Local storage is unavailable".to_string()
            }
            ClientError::Store(_) => "Something went wrong, please try again".to_string(),
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
