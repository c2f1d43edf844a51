//! Configuration management for the render server

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// PDF rendered on every request, relative to the working directory
pub const INPUT_PATH: &str = "sample.pdf";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be an integer between 0 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("RENDER_TIMEOUT_SECS must be a positive integer, got '{0}'")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Not read from the environment; always [`INPUT_PATH`] outside tests
    pub input_path: PathBuf,
    /// Render deadline in seconds, none by default
    pub timeout_secs: Option<u64>,
}

impl RenderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            render: RenderConfig {
                input_path: PathBuf::from(INPUT_PATH),
                timeout_secs: None,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// Unset and empty variables both fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.server.port,
        };

        let timeout_secs = match var("RENDER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => None,
        };

        Ok(Config {
            server: ServerConfig {
                host: var("HOST").unwrap_or(defaults.server.host),
                port,
            },
            render: RenderConfig {
                input_path: defaults.render.input_path,
                timeout_secs,
            },
        })
    }
}
