//! Error types shared by the HTTP client, the settings store and the view
//! controllers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Endpoint or API key missing; raised before any network I/O.
    #[error("API not configured")]
    NotConfigured,

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server's `message` field when the
    /// error body carried one.
    #[error("{}", http_message(.status, .message))]
    Http { status: u16, message: Option<String> },

    #[error("invalid response body: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),

    #[error("settings storage unavailable: {0}")]
    Storage(String),
}

fn http_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("HTTP error! status: {status}"),
    }
}

impl DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::PRECONDITION_FAILED,
            Self::Network(_) | Self::Http { .. } | Self::Parse(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for DashboardError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
