//! # Repository Module
//!
//! Repository implementations for the EShop record store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Client workflow                                                        │
//! │       │  store.users().verify(email, password)                          │
//! │       ▼                                                                 │
//! │  UserRepository / OrderRepository                                       │
//! │       │  SQL query                                                      │
//! │       ▼                                                                 │
//! │  SQLite database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                         │
//! │  • Session/cart/checkout logic never touches the engine directly,      │
//! │    so the store could be swapped for a server-backed implementation    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - account creation, lookup, verification
//! - [`order::OrderRepository`] - order creation and history

pub mod order;
pub mod user;
