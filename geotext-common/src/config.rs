//! Configuration loading and resolution
//!
//! Every service setting is resolved independently in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Compiled default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Compiled default HTTP port
pub const DEFAULT_PORT: u16 = 8080;
/// Compiled default tracing directive
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Compiled default request text limit (1 MiB)
pub const DEFAULT_MAX_TEXT_BYTES: usize = 1024 * 1024;

/// Environment variable naming an explicit config file
pub const ENV_CONFIG: &str = "GEOTEXT_CONFIG";
pub const ENV_HOST: &str = "GEOTEXT_HOST";
pub const ENV_PORT: &str = "GEOTEXT_PORT";
pub const ENV_LOG_LEVEL: &str = "GEOTEXT_LOG_LEVEL";

/// On-disk TOML configuration
///
/// All fields are optional; absent fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub max_text_bytes: Option<usize>,
}

impl TomlConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read config {} failed: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Parse config {} failed: {}", path.display(), e))
        })
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub max_text_bytes: usize,
    /// Config file that contributed values, if any
    pub config_file: Option<PathBuf>,
    /// Problems that were skipped during resolution, for logging once tracing is up
    pub warnings: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            config_file: None,
            warnings: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Resolve configuration from CLI overrides, environment, TOML and defaults
    ///
    /// An explicitly named config file (CLI or `GEOTEXT_CONFIG`) must exist and parse.
    /// The platform default file is optional.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let explicit_path = overrides
            .config_path
            .clone()
            .or_else(|| env_value(ENV_CONFIG).map(PathBuf::from));

        let mut warnings = Vec::new();
        let (toml_config, config_file) = match explicit_path {
            Some(path) => (TomlConfig::load(&path)?, Some(path)),
            None => match default_config_path() {
                Some(path) => match TomlConfig::load(&path) {
                    Ok(config) => (config, Some(path)),
                    Err(e) => {
                        warnings.push(format!("Ignoring config file: {}", e));
                        (TomlConfig::default(), None)
                    }
                },
                None => (TomlConfig::default(), None),
            },
        };

        let env_port = match env_value(ENV_PORT) {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
                Error::Config(format!("{} is not a valid port: {}", ENV_PORT, raw))
            })?),
            None => None,
        };

        let host = overrides
            .host
            .clone()
            .or_else(|| env_value(ENV_HOST))
            .or(toml_config.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = overrides
            .port
            .or(env_port)
            .or(toml_config.port)
            .unwrap_or(DEFAULT_PORT);

        let log_level = overrides
            .log_level
            .clone()
            .or_else(|| env_value(ENV_LOG_LEVEL))
            .or(toml_config.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let max_text_bytes = toml_config
            .max_text_bytes
            .unwrap_or(DEFAULT_MAX_TEXT_BYTES);
        if max_text_bytes == 0 {
            return Err(Error::Config("max_text_bytes must be positive".to_string()));
        }

        Ok(Self {
            host,
            port,
            log_level,
            max_text_bytes,
            config_file,
            warnings,
        })
    }

    /// Socket address to bind the HTTP listener to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| Error::Config(format!("Invalid host address: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Platform config file location, if one exists
///
/// Linux checks `~/.config/geotext/config.toml` then `/etc/geotext/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("geotext").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/geotext/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Non-empty environment variable value
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
