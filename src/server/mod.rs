//! Server core functionality
//!
//! Binds the HTTP listener and runs the serve loop.

pub mod core;

pub use self::core::Server;
