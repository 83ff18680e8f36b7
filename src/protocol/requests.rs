//! Query parameters accepted by the HTTP endpoints.

use serde::Deserialize;

use crate::navigate::ROOT_SEPARATOR;

/// `GET /?path=...`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub path: String,
}

impl ListQuery {
    /// The requested virtual path; a missing or blank parameter means the root.
    pub fn virtual_path(&self) -> String {
        if self.path.is_empty() {
            ROOT_SEPARATOR.to_string()
        } else {
            self.path.clone()
        }
    }
}

/// `GET /download?path=...`
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub path: Option<String>,
}
