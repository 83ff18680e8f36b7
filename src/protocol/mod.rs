//! HTTP protocol implementation
//!
//! Routes list and download requests, extracts their query parameters, and
//! renders the results.

pub mod handlers;
pub mod requests;
pub mod responses;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::catch_panic::CatchPanicLayer;

use crate::middleware::{handle_panic, log_request};
use crate::storage::ServerRoot;

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub root: Arc<ServerRoot>,
}

impl AppState {
    pub fn new(root: ServerRoot) -> Self {
        Self {
            root: Arc::new(root),
        }
    }
}

/// Build the file server router.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::list_files))
        .route("/download", get(handlers::download_file))
        .fallback(handlers::not_found);

    with_middleware(routes).with_state(state)
}

/// Panic recovery wrapped in request logging, so a request that panics
/// still gets its access-log line with the 500.
pub fn with_middleware<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum::middleware::from_fn(log_request))
}
