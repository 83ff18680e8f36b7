//! Error handlers
//!
//! Maps server errors onto HTTP status codes and logs them.

use axum::http::StatusCode;
use log::{error, warn};

use crate::error::types::ServerError;

/// Log a file server error at a level matching who caused it.
pub fn handle_error(err: &ServerError) {
    let status = error_to_status(err);
    if status.is_server_error() {
        error!("File server error ({}): {}", status.as_u16(), err);
    } else {
        warn!("Request rejected ({}): {}", status.as_u16(), err);
    }
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &ServerError) -> StatusCode {
    match err {
        ServerError::Path(_) => StatusCode::BAD_REQUEST,
        ServerError::MissingParameter(_) => StatusCode::BAD_REQUEST,
        ServerError::Storage(e) if e.is_not_found() => StatusCode::NOT_FOUND,
        ServerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServerError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServerError::Bind { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
