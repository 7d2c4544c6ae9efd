//! End-to-end demo of the storefront core.
//!
//! Opens (or creates) the local store, registers a demo account if needed,
//! fills a cart from the catalog, checks out, and prints the order history.
//!
//! ```text
//! ESHOP_DATA_DIR=/tmp/eshop cargo run --bin storefront-demo
//! ```

use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use eshop_client::{place_order, CartState, ClientConfig, ClientError, PointerStore, SessionManager, SessionState};
use eshop_core::{catalog, BillingInfo, Money};
use eshop_store::{RecordStore, StoreConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,eshop=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ClientConfig::from_env();
    config.ensure_data_dir()?;

    let store = RecordStore::open(StoreConfig::new(config.db_path())).await?;

    let mut session = SessionManager::new(
        store.clone(),
        PointerStore::new(config.session_pointer_path()),
    );

    // Restore a previous session, or sign in fresh
    session.restore().await?;
    if !matches!(session.state(), SessionState::Authenticated(_)) {
        match session.register("Demo User", "demo@example.com", "demo-password").await {
            Ok(_) => {}
            Err(ClientError::AlreadyExists) => {
                session.login("demo@example.com", "demo-password").await?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let me = session.current().ok_or("no session after sign-in")?.clone();
    info!(name = %me.name, email = %me.email, "Shopping as");

    // Browse the catalog and fill a cart
    let cart = CartState::new();
    let products = catalog::all_products();
    cart.add_item(&products[0], 1)?;
    cart.add_item(&products[2], 2)?;

    let totals = cart.totals();
    println!(
        "Cart: {} lines, {} units, {}",
        totals.item_count,
        totals.total_quantity,
        Money::from_cents(totals.total_cents)
    );

    let billing = BillingInfo {
        full_name: me.name.clone(),
        email: me.email.clone(),
        address: "123 Main St".to_string(),
        city: "Springfield".to_string(),
        postal_code: "12345".to_string(),
        country: "United States".to_string(),
        payment_method: "credit-card".to_string(),
    };

    let order = place_order(&store, &session, &cart, billing).await?;
    println!(
        "Placed order {} for {}",
        order.id,
        Money::from_cents(order.total_cents)
    );

    // Order history, newest first
    let history = store.orders().get_by_user(&me.user_id).await?;
    println!("Order history ({} orders):", history.len());
    for order in &history {
        println!(
            "  {}  {}  {:?}  {} items",
            order.created_at.format("%Y-%m-%d %H:%M:%S"),
            Money::from_cents(order.total_cents),
            order.status,
            order.items.len()
        );
    }

    store.close().await;
    Ok(())
}
