//! Storage operations
//!
//! Handles the file system side of the list and download requests.

use log::{debug, error, info, warn};
use std::fs::{self, File};
use std::path::Path;

use crate::error::StorageError;
use crate::navigate::{ConfinedPath, is_addressable};
use crate::storage::filesystem::{ServerRoot, directory_exists, file_exists};
use crate::storage::results::{DirectoryListing, FileHandle};

/// Fallback when the extension gives nothing away.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Lists the immediate children of a directory.
///
/// Directory names get a trailing `/`. Entries are sorted by name. Names the
/// resolver could never accept back (not UTF-8, control characters, a
/// platform separator or drive prefix) are left out.
pub fn list_directory(
    server_root: &ServerRoot,
    confined_path: &ConfinedPath,
) -> Result<DirectoryListing, StorageError> {
    let real_path = server_root.resolve(confined_path);

    if !directory_exists(&real_path) {
        warn!(
            "Directory not found for {} (real: {})",
            confined_path,
            real_path.display()
        );
        return Err(StorageError::DirectoryNotFound(real_path));
    }

    let entries = fs::read_dir(&real_path).map_err(|e| {
        error!(
            "Failed to list directory {} (real: {}): {}",
            confined_path,
            real_path.display(),
            e
        );
        StorageError::io(&real_path, e)
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StorageError::io(&real_path, e))?;
        let name = match entry.file_name().into_string() {
            Ok(name) if is_addressable(confined_path, &name) => name,
            Ok(name) => {
                debug!("Skipping unreachable entry {name:?} in {confined_path}");
                continue;
            }
            Err(raw) => {
                debug!("Skipping non UTF-8 entry {raw:?} in {confined_path}");
                continue;
            }
        };

        // Follows symlinks, so a link to a directory is browsable.
        if entry.path().is_dir() {
            names.push(format!("{name}/"));
        } else {
            names.push(name);
        }
    }
    names.sort();

    info!(
        "Listed directory {} (real: {}) - {} entries",
        confined_path,
        real_path.display(),
        names.len()
    );

    Ok(DirectoryListing {
        path: confined_path.clone(),
        entries: names,
    })
}

/// Opens a regular file for transfer.
pub fn open_file(
    server_root: &ServerRoot,
    confined_path: &ConfinedPath,
) -> Result<FileHandle, StorageError> {
    let real_path = server_root.resolve(confined_path);

    let Some(name) = confined_path.file_name() else {
        return Err(StorageError::FileNotFound(real_path));
    };

    if !file_exists(&real_path) {
        warn!(
            "File not found for {} (real: {})",
            confined_path,
            real_path.display()
        );
        return Err(StorageError::FileNotFound(real_path));
    }

    let file = File::open(&real_path).map_err(|e| {
        error!("Failed to open file {}: {}", real_path.display(), e);
        StorageError::io(&real_path, e)
    })?;
    let length = file
        .metadata()
        .map_err(|e| StorageError::io(&real_path, e))?
        .len();
    let content_type = guess_content_type(&real_path);

    info!(
        "Prepared file retrieval for {} (real: {}, {} bytes, {})",
        name,
        real_path.display(),
        length,
        content_type
    );

    Ok(FileHandle {
        file,
        name: name.to_string(),
        content_type,
        length,
    })
}

/// Best-effort MIME type from the file extension.
pub fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
