//! Panic recovery
//!
//! A panicking handler becomes a 500 page instead of a dropped connection.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::error;
use std::any::Any;

use crate::protocol::responses::render_error_page;

/// Response factory for `tower_http::catch_panic::CatchPanicLayer`
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!("Request handler panicked: {}", detail);

    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (status, Html(render_error_page(status, "Internal server error"))).into_response()
}
