//! Dashboard routes.
//!
//! GET  /api/dashboard - Summary statistics and recent orders
//! POST /api/refresh   - Reload the dashboard and the current orders page

use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use crate::error::DashboardResult;
use crate::state::AppState;
use crate::views::dashboard::DashboardView;
use crate::views::{self, RefreshView};

pub fn router() -> Router {
    Router::new()
        .route("/api/dashboard", get(show_dashboard))
        .route("/api/refresh", post(refresh))
}

async fn show_dashboard(
    Extension(state): Extension<AppState>,
) -> DashboardResult<Json<DashboardView>> {
    Ok(Json(state.dashboard.load().await?))
}

async fn refresh(Extension(state): Extension<AppState>) -> Json<RefreshView> {
    Json(views::refresh(&state.feedback, &state.dashboard, &state.orders).await)
}
