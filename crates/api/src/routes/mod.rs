//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use settleup_core::settlement::SettlementError;
use settleup_shared::AppError;

use crate::AppState;

pub mod health;
pub mod settlements;
pub mod splits;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(settlements::routes())
        .merge(splits::routes())
}

/// Builds an error response with the given status.
pub(crate) fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into()
        })),
    )
        .into_response()
}

/// Maps a settlement error to its HTTP response.
pub(crate) fn settlement_error_response(err: &SettlementError) -> Response {
    let status = StatusCode::from_u16(AppError::from(err.clone()).status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, err.error_code(), err.to_string())
}
