//! Application configuration loading from config.toml
//!
//! The TOML file holds the HTTP listener settings and an optional list of
//! flights used to seed an empty database on first run. A missing file is not
//! an error: the service then starts with defaults and no seed data.
//! `HOST` and `PORT` environment variables take precedence over the file.

use crate::core::flight::FlightDraft;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "FLIGHT_SERVICE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Flights inserted when the database is empty
    #[serde(default)]
    pub flights: Vec<FlightDraft>,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Overrides host and port with values taken from the environment.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `port` is present but not a valid port number.
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<String>) -> Result<()> {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port.trim().parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT value {port:?}: {e}"),
            })?;
        }
        Ok(())
    }
}

/// Parses configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Resolves the config file path: `FLIGHT_SERVICE_CONFIG` if set, else `./config.toml`.
#[must_use]
pub fn resolve_config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Loads the application configuration and applies `HOST`/`PORT` overrides.
///
/// # Errors
/// Returns [`Error::Config`] if the file exists but cannot be parsed, or if an
/// override is invalid.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = resolve_config_path();
    let mut config = if path.exists() {
        let config = load_config(&path)?;
        info!(
            path = %path.display(),
            seed_flights = config.flights.len(),
            "Loaded configuration file"
        );
        config
    } else {
        info!(path = %path.display(), "No configuration file found, using defaults");
        AppConfig::default()
    };

    config
        .server
        .apply_overrides(std::env::var("HOST").ok(), std::env::var("PORT").ok())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::flight::FareInput;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            allowed_origins = ["http://localhost:3000"]

            [[flights]]
            airlines = "Air India"
            name = "AI4131"
            from = "PNQ"
            to = "BOM"
            date = "2020-09-05"
            fare = 4000

            [[flights]]
            airlines = "IndiGo"
            name = "6E-201"
            from = "BOM"
            to = "DEL"
            date = "2020-09-06T07:30:00Z"
            fare = "3200.5"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.flights.len(), 2);
        assert_eq!(config.flights[0].airline.as_deref(), Some("Air India"));
        assert_eq!(config.flights[0].fare, Some(FareInput::Number(4000.0)));
        assert_eq!(
            config.flights[1].fare,
            Some(FareInput::Text("3200.5".to_string()))
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:5000");
        assert!(config.server.allowed_origins.is_empty());
        assert!(config.flights.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result: std::result::Result<AppConfig, _> = toml::from_str("[server]\nport = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_config("/nonexistent/flight-service/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut server = ServerConfig::default();
        server
            .apply_overrides(Some("127.0.0.1".to_string()), Some(" 9090 ".to_string()))
            .unwrap();
        assert_eq!(server.bind_address(), "127.0.0.1:9090");

        // Blank host keeps the current value
        server.apply_overrides(Some(String::new()), None).unwrap();
        assert_eq!(server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_port_override() {
        let mut server = ServerConfig::default();
        let result = server.apply_overrides(None, Some("eighty".to_string()));
        assert!(matches!(result, Err(Error::Config { .. })));
        assert_eq!(server.port, 5000);
    }
}
