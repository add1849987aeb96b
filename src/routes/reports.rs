//! Report routes.
//!
//! POST /api/reports/{kind} - Start generating a report

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Extension, Json, Router};

use crate::state::AppState;
use crate::views::reports::ReportJob;

pub fn router() -> Router {
    Router::new().route("/api/reports/{kind}", post(generate_report))
}

async fn generate_report(
    Extension(state): Extension<AppState>,
    Path(kind): Path<String>,
) -> (StatusCode, Json<ReportJob>) {
    let (job, _handle) = state.reports.generate(&kind);
    (StatusCode::ACCEPTED, Json(job))
}
