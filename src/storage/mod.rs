//! File system storage management
//!
//! Turns confined paths into directory listings and open file handles.

pub mod filesystem;
pub mod operations;
pub mod results;

pub use filesystem::ServerRoot;
pub use operations::{OCTET_STREAM, list_directory, open_file, guess_content_type};
pub use results::{DirectoryListing, FileHandle};
