//! # Order Dashboard
//!
//! Administrative dashboard service for an order-management backend.
//!
//! ## Screens
//!
//! 1. **Dashboard**: order counts, revenue and recent orders
//! 2. **Orders**: paginated list with status updates and deletion
//! 3. **Create Order**: line-item form with a running total
//! 4. **Settings**: backend endpoint, API key, region and debug flag
//!
//! ## Architecture
//!
//! - Axum serves each screen's view model as JSON for the browser front end
//! - Reqwest talks to the order-management backend
//! - SQLx persists the connection settings

use tracing::info;

use order_dashboard::config::ServiceEnv;
use order_dashboard::models::ReferenceData;
use order_dashboard::state::AppState;
use order_dashboard::{create_app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_dashboard=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting order dashboard");

    let env = ServiceEnv::from_env();
    let store = db::connect_settings_store(&env.database_url).await;

    let state = AppState::bootstrap(store, ReferenceData::default()).await;
    let app = create_app(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(&env.bind_addr).await?;
    info!("Listening on {}", env.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
