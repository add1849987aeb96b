//! Orders list and detail routes.
//!
//! GET    /api/orders               - Current page of orders
//! POST   /api/orders/page          - Move by `delta` pages and reload
//! GET    /api/orders/{id}          - Order detail with items
//! GET    /api/orders/{id}/workflow - Fulfilment workflow status
//! PUT    /api/orders/{id}/status   - Set a free-text status
//! DELETE /api/orders/{id}          - Delete (requires `?confirm=true`)

use axum::extract::{Path, Query};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use serde::Deserialize;

use crate::error::DashboardResult;
use crate::models::WorkflowStatus;
use crate::state::AppState;
use crate::views::order_detail::OrderDetailView;
use crate::views::orders::{ActionOutcome, OrdersPageView};

pub fn router() -> Router {
    Router::new()
        .route("/api/orders", get(list_orders))
        .route("/api/orders/page", post(change_page))
        .route("/api/orders/{id}", get(get_order).delete(delete_order))
        .route("/api/orders/{id}/workflow", get(get_workflow))
        .route("/api/orders/{id}/status", put(update_status))
}

#[derive(Debug, Deserialize)]
pub struct ChangePage {
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Confirmation {
    #[serde(default)]
    pub confirm: bool,
}

async fn list_orders(
    Extension(state): Extension<AppState>,
) -> DashboardResult<Json<OrdersPageView>> {
    Ok(Json(state.orders.load().await?))
}

async fn change_page(
    Extension(state): Extension<AppState>,
    Json(req): Json<ChangePage>,
) -> DashboardResult<Json<OrdersPageView>> {
    Ok(Json(state.orders.change_page(req.delta).await?))
}

async fn get_order(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Json<OrderDetailView>> {
    Ok(Json(state.order_detail.load(&id).await?))
}

async fn get_workflow(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> DashboardResult<Json<WorkflowStatus>> {
    Ok(Json(state.order_detail.workflow(&id).await?))
}

async fn update_status(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdate>,
) -> DashboardResult<Json<ActionOutcome>> {
    Ok(Json(
        state
            .orders
            .update_status(&id, req.status.as_deref())
            .await?,
    ))
}

async fn delete_order(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Query(confirmation): Query<Confirmation>,
) -> DashboardResult<Json<ActionOutcome>> {
    Ok(Json(state.orders.delete(&id, confirmation.confirm).await?))
}
