use std::{net, path::PathBuf};

use crate::{error::ConfigurationError, logger::config::Log};

/// Environment variable prefix for configuration overrides, e.g.
/// `RPC__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "RPC";

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub server: Server,
    #[serde(default)]
    pub log: Log,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn socket_addr(&self) -> Result<net::SocketAddr, ConfigurationError> {
        Ok(net::SocketAddr::new(self.host.parse()?, self.port))
    }
}

impl Config {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    /// Build the configuration from an optional TOML file plus
    /// prefixed environment variables; environment wins.
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000_i64)?;

        if let Some(path) = explicit_config_path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let built = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        built.try_deserialize()
    }
}
