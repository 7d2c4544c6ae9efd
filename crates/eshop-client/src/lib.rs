//! # EShop Client
//!
//! The orchestration layer of the storefront: session lifecycle, shared
//! cart state, and the checkout workflow, glued over the record store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          eshop-client                                   │
//! │                                                                         │
//! │   SessionManager ──┐                                                    │
//! │   (session.rs)     │                                                    │
//! │                    ├──▶ checkout::place_order ──▶ RecordStore           │
//! │   CartState ───────┘         (checkout.rs)        (eshop-store)         │
//! │   (state.rs)                                                            │
//! │                                                                         │
//! │   PointerStore (pointer.rs) persists the session across restarts.      │
//! │   ClientConfig (config.rs) decides where everything lives on disk.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod pointer;
pub mod session;
pub mod state;

pub use checkout::place_order;
pub use config::ClientConfig;
pub use error::{CheckoutRejection, ClientError, ClientResult};
pub use pointer::{PointerStore, SessionPointer};
pub use session::{Session, SessionManager, SessionState};
pub use state::CartState;
