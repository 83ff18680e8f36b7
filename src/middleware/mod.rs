//! Server middleware
//!
//! Request logging and panic recovery layered onto the router.

pub mod logging;
pub mod recovery;

pub use logging::log_request;
pub use recovery::handle_panic;
