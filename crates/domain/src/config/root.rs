use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_FILE: &str = "hostdns.toml";

/// Main configuration structure for hostdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Local listeners (ports, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream discovery and exchange settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. hostdns.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::from_file(LOCAL_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.udp_port {
            self.server.udp_port = port;
        }
        if let Some(port) = overrides.tcp_port {
            self.server.tcp_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(timeout) = overrides.query_timeout_ms {
            self.upstream.query_timeout_ms = timeout;
        }
        if let Some(path) = overrides.resolv_conf {
            self.upstream.resolv_conf = path;
        }
        if overrides.disable_system_split_dns {
            self.upstream.system_split_dns = false;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream.query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.logging.format.to_ascii_lowercase().as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                self.logging.format
            )));
        }

        self.bind_ip()?;
        Ok(())
    }

    pub fn bind_ip(&self) -> Result<IpAddr, ConfigError> {
        self.server.bind_address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid bind address '{}'",
                self.server.bind_address
            ))
        })
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub udp_port: Option<u16>,
    pub tcp_port: Option<u16>,
    pub bind_address: Option<String>,
    pub query_timeout_ms: Option<u64>,
    pub resolv_conf: Option<String>,
    pub disable_system_split_dns: bool,
    pub log_level: Option<String>,
}
