//! Result types for navigate operations

use std::fmt;
use std::path::PathBuf;

use super::ROOT_SEPARATOR;

/// A normalized, root-relative path.
///
/// Only the resolver builds these, so a `ConfinedPath` never holds a `..`
/// segment and joining it to the server root stays inside the root. The
/// default value is the root of the served tree (`/`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConfinedPath {
    segments: Vec<String>,
}

impl ConfinedPath {
    pub(crate) fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Last segment, `None` at the root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Enclosing directory, `None` at the root.
    pub fn parent(&self) -> Option<ConfinedPath> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self::from_segments(rest.to_vec()))
    }

    /// Virtual path of a listing entry below this directory.
    ///
    /// Directory entries keep their trailing separator.
    pub fn child(&self, entry: &str) -> String {
        format!("{self}{entry}")
    }

    /// Relative filesystem path with no root component.
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

impl fmt::Display for ConfinedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ROOT_SEPARATOR}")?;
        for segment in &self.segments {
            write!(f, "{segment}{ROOT_SEPARATOR}")?;
        }
        Ok(())
    }
}
