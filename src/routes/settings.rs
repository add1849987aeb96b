//! Settings panel routes.
//!
//! GET    /api/settings      - Open the panel with the live configuration
//! POST   /api/settings      - Validate and save
//! POST   /api/settings/test - Probe the backend with the submitted form
//! DELETE /api/settings      - Clear all settings (requires `?confirm=true`)

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use crate::error::DashboardResult;
use crate::routes::orders::Confirmation;
use crate::state::AppState;
use crate::views::settings_panel::{ClearOutcome, ProbeOutcome, SaveOutcome, SettingsForm, SettingsView};

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/settings",
            get(open_settings).post(save_settings).delete(clear_settings),
        )
        .route("/api/settings/test", post(test_connection))
}

async fn open_settings(Extension(state): Extension<AppState>) -> Json<SettingsView> {
    Json(state.settings.open())
}

/// Field errors come back as 422 with the inline messages.
async fn save_settings(
    Extension(state): Extension<AppState>,
    Json(form): Json<SettingsForm>,
) -> DashboardResult<(StatusCode, Json<SaveOutcome>)> {
    let outcome = state.settings.save(&form).await?;
    let status = match outcome {
        SaveOutcome::Invalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SaveOutcome::Saved { .. } => StatusCode::OK,
    };
    Ok((status, Json(outcome)))
}

async fn test_connection(
    Extension(state): Extension<AppState>,
    Json(form): Json<SettingsForm>,
) -> DashboardResult<Json<ProbeOutcome>> {
    Ok(Json(state.settings.test_connection(&form).await?))
}

async fn clear_settings(
    Extension(state): Extension<AppState>,
    Query(confirmation): Query<Confirmation>,
) -> DashboardResult<Json<ClearOutcome>> {
    Ok(Json(state.settings.clear_all(confirmation.confirm).await?))
}
