//! Error handling
//!
//! Defines error types and their HTTP mapping for the file server.

pub mod handlers;
pub mod types;

pub use handlers::{error_to_status, handle_error};
pub use types::*;
