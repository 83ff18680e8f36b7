//! File system root
//!
//! The served directory and the helpers that join confined paths onto it.

use std::io;
use std::path::{Path, PathBuf};

use crate::navigate::ConfinedPath;

/// The single directory the server exposes. Fixed once at startup.
#[derive(Debug, Clone)]
pub struct ServerRoot {
    path: PathBuf,
}

impl ServerRoot {
    /// Canonicalizes `path` and checks that it names a directory.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().canonicalize()?;
        if !directory_exists(&path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("server root is not a directory: {}", path.display()),
            ));
        }
        Ok(Self { path })
    }

    /// Absolute path of the root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Joins a confined path onto the root. Every segment is a plain
    /// component, so the result stays below the root.
    pub fn resolve(&self, confined: &ConfinedPath) -> PathBuf {
        let joined = self.path.join(confined.to_relative_path());
        debug_assert!(joined.starts_with(&self.path), "{confined} left the root");
        joined
    }
}

/// Check if file exists
pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Check if directory exists
pub fn directory_exists(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
