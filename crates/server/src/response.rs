//! JSON error bodies with a tracking ticket mirrored to the log.

use std::fmt::Display;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

const TICKET_PREFIX: &str = "todolist";

/// Body of every error response. `tracking` matches a ticket logged
/// server-side so a report can be correlated with the log line.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub tracking: String,
}

pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

pub fn bad_request(err: impl Display) -> ErrorResponse {
    error_response(StatusCode::BAD_REQUEST, err)
}

pub fn not_found(err: impl Display) -> ErrorResponse {
    error_response(StatusCode::NOT_FOUND, err)
}

pub fn internal_error(err: impl Display) -> ErrorResponse {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, err)
}

fn error_response(status: StatusCode, err: impl Display) -> ErrorResponse {
    let message = err.to_string();
    let tracking = format!("{TICKET_PREFIX}-{}", Uuid::new_v4().simple());
    if status.is_server_error() {
        tracing::error!(%tracking, "{message}");
    } else {
        tracing::warn!(%tracking, "{message}");
    }
    (status, Json(ErrorBody { message, tracking }))
}
