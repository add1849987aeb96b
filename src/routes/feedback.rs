//! Notification routes.
//!
//! GET    /api/feedback             - Active toasts, activity log, last response time, banner
//! DELETE /api/feedback/toasts/{id} - Dismiss a toast

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Extension, Json, Router};
use uuid::Uuid;

use crate::feedback::FeedbackSnapshot;
use crate::state::AppState;

pub fn router() -> Router {
    Router::new()
        .route("/api/feedback", get(show_feedback))
        .route("/api/feedback/toasts/{id}", delete(dismiss_toast))
}

async fn show_feedback(Extension(state): Extension<AppState>) -> Json<FeedbackSnapshot> {
    Json(state.feedback.snapshot())
}

async fn dismiss_toast(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.feedback.dismiss(id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
