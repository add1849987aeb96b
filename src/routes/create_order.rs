//! Create-order form routes.
//!
//! GET    /api/create-order              - Current form with running total
//! PUT    /api/create-order/customer     - Select the customer
//! POST   /api/create-order/rows         - Add a line item
//! PUT    /api/create-order/rows/{index} - Set a line item's product and quantity
//! DELETE /api/create-order/rows/{index} - Remove an added line item
//! POST   /api/create-order/submit       - Submit and switch to the orders list

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use serde::Deserialize;

use crate::error::DashboardResult;
use crate::state::AppState;
use crate::views::create_order::{CreateOrderView, SubmitOutcome};

pub fn router() -> Router {
    Router::new()
        .route("/api/create-order", get(show_form))
        .route("/api/create-order/customer", put(select_customer))
        .route("/api/create-order/rows", post(add_row))
        .route(
            "/api/create-order/rows/{index}",
            put(update_row).delete(remove_row),
        )
        .route("/api/create-order/submit", post(submit))
}

#[derive(Debug, Deserialize)]
pub struct CustomerSelection {
    #[serde(default)]
    pub customer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RowUpdate {
    #[serde(default)]
    pub product_id: Option<String>,
    pub quantity: i64,
}

async fn show_form(Extension(state): Extension<AppState>) -> Json<CreateOrderView> {
    Json(state.create_order.view().await)
}

async fn select_customer(
    Extension(state): Extension<AppState>,
    Json(req): Json<CustomerSelection>,
) -> Json<CreateOrderView> {
    Json(state.create_order.select_customer(req.customer_id).await)
}

async fn add_row(Extension(state): Extension<AppState>) -> Json<CreateOrderView> {
    Json(state.create_order.add_row().await)
}

async fn update_row(
    Extension(state): Extension<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<RowUpdate>,
) -> DashboardResult<Json<CreateOrderView>> {
    Ok(Json(
        state
            .create_order
            .update_row(index, req.product_id, req.quantity)
            .await?,
    ))
}

async fn remove_row(
    Extension(state): Extension<AppState>,
    Path(index): Path<usize>,
) -> DashboardResult<Json<CreateOrderView>> {
    Ok(Json(state.create_order.remove_row(index).await?))
}

async fn submit(
    Extension(state): Extension<AppState>,
) -> DashboardResult<(StatusCode, Json<SubmitOutcome>)> {
    let outcome = state.create_order.submit(&state.orders).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
