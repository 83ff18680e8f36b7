//! Configuration management for RAX File Server
//!
//! Everything here is startup configuration: it is read once before the
//! listener binds and never changes while the server runs.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::storage::ServerRoot;

/// Environment variables override the file, e.g. `RAX_HTTP_SERVER_ROOT`.
pub const ENV_PREFIX: &str = "RAX_HTTP";

const DEFAULT_CONFIG_PATH: &str = "config";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SERVER_ROOT: &str = "./server_root";

/// Complete server configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Directory exposed to clients
    pub server_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            server_root: DEFAULT_SERVER_ROOT.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config.toml` (optional) with environment
    /// overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from the given file stem (optional) with
    /// environment overrides
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("server_root", defaults.server_root)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.server_root.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "server_root cannot be empty".into(),
            ));
        }

        self.socket_addr()?;
        Ok(())
    }

    /// Bind address and port as a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, config::ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|e| {
            config::ConfigError::Message(format!(
                "invalid bind address '{}': {}",
                self.bind_address, e
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Get server root as PathBuf
    pub fn server_root_path(&self) -> PathBuf {
        PathBuf::from(&self.server_root)
    }

    /// Open the configured root; fails if it is not an existing directory.
    pub fn server_root(&self) -> Result<ServerRoot, config::ConfigError> {
        ServerRoot::new(self.server_root_path()).map_err(|e| {
            config::ConfigError::Message(format!(
                "server_root '{}' is unusable: {}",
                self.server_root, e
            ))
        })
    }
}
