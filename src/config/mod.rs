//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `ESSAY_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `ESSAY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `5000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Base URL of the LanguageTool service (`/v2/check` is appended).
    pub languagetool_url: String,

    /// Timeout applied to each grammar-service call. Default: 30s.
    pub grammar_timeout: Duration,

    /// Directory holding a BERT sentence encoder. Unset means hashed embeddings.
    pub model_path: Option<PathBuf>,
}

/// Public LanguageTool endpoint used when `ESSAY_LANGUAGETOOL_URL` is not set.
pub const DEFAULT_LANGUAGETOOL_URL: &str = "https://api.languagetool.org";

/// Default grammar-service timeout in seconds.
pub const DEFAULT_GRAMMAR_TIMEOUT_SECS: u64 = 30;

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            languagetool_url: DEFAULT_LANGUAGETOOL_URL.to_string(),
            grammar_timeout: Duration::from_secs(DEFAULT_GRAMMAR_TIMEOUT_SECS),
            model_path: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "ESSAY_PORT";
    const ENV_BIND_ADDR: &'static str = "ESSAY_BIND_ADDR";
    const ENV_LANGUAGETOOL_URL: &'static str = "ESSAY_LANGUAGETOOL_URL";
    const ENV_GRAMMAR_TIMEOUT_SECS: &'static str = "ESSAY_GRAMMAR_TIMEOUT_SECS";
    const ENV_MODEL_PATH: &'static str = "ESSAY_MODEL_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let languagetool_url =
            Self::parse_string_from_env(Self::ENV_LANGUAGETOOL_URL, defaults.languagetool_url);
        let grammar_timeout = Self::parse_timeout_from_env(defaults.grammar_timeout)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);

        Ok(Self {
            port,
            bind_addr,
            languagetool_url,
            grammar_timeout,
            model_path,
        })
    }

    /// Validates the LanguageTool URL and model directory (no network access).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.languagetool_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                value: self.languagetool_url.clone(),
            });
        }

        if self.grammar_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                value: "0".to_string(),
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Address a local health probe connects to: the bind address, or
    /// loopback of the same family when bound to a wildcard address.
    pub fn probe_addr(&self) -> SocketAddr {
        let ip = match self.bind_addr {
            IpAddr::V4(addr) if addr.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(addr) if addr.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            addr => addr,
        };
        SocketAddr::new(ip, self.port)
    }

    pub fn health_check_url(&self) -> String {
        format!("http://{}/healthz", self.probe_addr())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_GRAMMAR_TIMEOUT_SECS) {
            Ok(value) => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout {
                        value: value.clone(),
                    })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidTimeout { value });
                }
                Ok(Duration::from_secs(secs))
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
