pub mod config;
pub mod error;
pub mod middleware;
pub mod navigate;
pub mod protocol;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::ServerConfig;
pub use server::Server;
