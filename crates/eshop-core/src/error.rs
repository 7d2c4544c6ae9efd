//! # Error Types
//!
//! Domain-specific error types for eshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  eshop-core errors (this file)                                          │
//! │  ├── CoreError        - Cart and domain rule violations                 │
//! │  └── ValidationError  - Creation-time invariant failures                │
//! │                                                                         │
//! │  eshop-store errors (separate crate)                                    │
//! │  └── StoreError       - Record store failures                           │
//! │                                                                         │
//! │  eshop-client errors (separate crate)                                   │
//! │  └── ClientError      - What the presentation layer sees                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, limits, amounts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart has exceeded the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Creation-time invariant failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A collection field that must not be empty is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Declared order total does not equal the sum of line totals.
    #[error("order total {declared} does not match sum of line totals {computed}")]
    TotalMismatch { declared: i64, computed: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
