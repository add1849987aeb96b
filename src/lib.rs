//! # Order Dashboard Library
//!
//! Exposes the Axum router and modules so integration tests can create
//! an in-process server without requiring `cargo run` in another terminal.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod feedback;
pub mod models;
pub mod routes;
pub mod settings_store;
pub mod state;
pub mod views;

use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all route modules and middleware.
///
/// The caller is responsible for bootstrapping the state. This function
/// does NOT start a server.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::dashboard::router())
        .merge(routes::orders::router())
        .merge(routes::create_order::router())
        .merge(routes::settings::router())
        .merge(routes::feedback::router())
        .merge(routes::reports::router())
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
