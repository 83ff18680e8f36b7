//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::fs::File;

use crate::navigate::ConfinedPath;

/// Result of a directory listing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Normalized path of the listed directory.
    pub path: ConfinedPath,
    /// Entry names; directories end with `/`.
    pub entries: Vec<String>,
}

/// An opened file ready to be streamed to a client
#[derive(Debug)]
pub struct FileHandle {
    pub file: File,
    pub name: String,
    pub content_type: String,
    pub length: u64,
}
