//! Request handlers for the file server.
//!
//! Each handler resolves the client's virtual path first, then hands the
//! confined path to the storage layer on the blocking pool.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use log::info;
use tokio::task;

use crate::error::ServerError;
use crate::navigate;
use crate::protocol::AppState;
use crate::protocol::requests::{DownloadQuery, ListQuery};
use crate::protocol::responses::{file_attachment, render_error_page, render_listing};
use crate::storage;

/// `GET /`: HTML listing of the requested directory.
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, ServerError> {
    let current = navigate::resolve(&query.virtual_path())?;

    let root = Arc::clone(&state.root);
    let listing = task::spawn_blocking(move || storage::list_directory(&root, &current)).await??;

    Ok(Html(render_listing(&listing)))
}

/// `GET /download`: the requested file as an attachment.
pub async fn download_file(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ServerError> {
    let raw_path = query.path.ok_or(ServerError::MissingParameter("path"))?;
    let target = navigate::resolve_download(&raw_path)?;

    let root = Arc::clone(&state.root);
    let handle = task::spawn_blocking(move || storage::open_file(&root, &target)).await??;

    info!(
        "Sending {} ({} bytes, {})",
        handle.name, handle.length, handle.content_type
    );
    Ok(file_attachment(handle))
}

/// Any other route.
pub async fn not_found(uri: Uri) -> Response {
    let status = StatusCode::NOT_FOUND;
    let message = format!("No route for {}", uri.path());
    (status, Html(render_error_page(status, &message))).into_response()
}
