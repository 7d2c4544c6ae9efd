//! # eshop-store: Record Store for EShop
//!
//! This crate provides durable storage for the EShop storefront.
//! It uses SQLite for local persistence with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EShop Data Flow                                  │
//! │                                                                         │
//! │  Client workflow (register / login / checkout)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   eshop-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │  RecordStore  │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │  user / order │    │  (embedded)  │   │   │
//! │  │   │               │◄───│               │    │ 001_init.sql │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │            plus credentials (argon2 hashing)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (device-local, single trusted device)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Record store error types
//! - [`credentials`] - Password hashing and verification
//! - [`repository`] - Repository implementations (user, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eshop_store::{RecordStore, StoreConfig};
//!
//! let store = RecordStore::open(StoreConfig::new("path/to/eshop.db")).await?;
//!
//! let user = store.users().create("Jane", "Jane@Example.com", "hunter2!").await?;
//! let found = store.users().get_by_email("jane@example.com").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod credentials;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{RecordStore, StoreConfig};

// Repository re-exports for convenience
pub use repository::order::OrderRepository;
pub use repository::user::UserRepository;
