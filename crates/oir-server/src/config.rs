//! Server configuration
//!
//! Layered as defaults, then an optional TOML file, then environment
//! overrides (`PORT`, `OIR_STORAGE_ROOT`).

use oir_core::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`ServerConfig::port`]
pub const PORT_ENV: &str = "PORT";
/// Environment variable overriding [`ServerConfig::storage_root`]
pub const STORAGE_ROOT_ENV: &str = "OIR_STORAGE_ROOT";

/// Configuration loading failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment override that does not parse
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory uploaded documents are written under
    pub storage_root: PathBuf,
    /// Largest accepted request body, in bytes
    pub body_limit: u64,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    pub log_json: bool,
    /// Start with the sample records loaded
    pub seed: bool,
    pub registry: RegistryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            storage_root: PathBuf::from("storage"),
            // base64 inflates a 10 MB upload to ~13.4 MB
            body_limit: 16 * 1024 * 1024,
            log_filter: "info".to_string(),
            log_json: false,
            seed: false,
            registry: RegistryConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults overlaid with `path` (when given) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides(|name| std::env::var(name).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply overrides read through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(PORT_ENV) {
            self.port = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: PORT_ENV,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(STORAGE_ROOT_ENV).filter(|v| !v.trim().is_empty()) {
            self.storage_root = PathBuf::from(value);
        }
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_storage_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.storage_root = root.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
