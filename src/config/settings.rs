//! Server settings read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_INDICATORS_DIR: &str = "./config/indicators";

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Directory holding the indicator YAML files (`INDICATORS_DIR`).
    pub indicators_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            indicators_dir: PathBuf::from(DEFAULT_INDICATORS_DIR),
        }
    }
}

impl ServerSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| EngineError::InvalidInput {
                field: "PORT".to_string(),
                message: e.to_string(),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            indicators_dir: lookup("INDICATORS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.indicators_dir),
        })
    }

    /// Returns the socket address to bind.
    pub fn bind_addr(&self) -> EngineResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| EngineError::InvalidInput {
                field: "HOST".to_string(),
                message: e.to_string(),
            })
    }
}
