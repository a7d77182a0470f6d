//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::maps::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment variable holding the Google Maps API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport selection, read from `MCP_TRANSPORT` at startup.
    #[serde(skip)]
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Mapping provider settings.
    pub maps: MapsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Google Maps Platform API key.
    /// Needs the Directions, Distance Matrix, Geocoding and Places APIs enabled.
    pub google_maps_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Mapping provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Base URL of the web service endpoints.
    pub base_url: String,

    /// Language for provider results (e.g. "en", "fr").
    pub language: Option<String>,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "maps-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            maps: MapsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// The API key is read from `GOOGLE_MAPS_API_KEY`; everything else is
    /// prefixed with `MCP_`, e.g. `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        match std::env::var(API_KEY_ENV) {
            Ok(api_key) if !api_key.trim().is_empty() => {
                config.credentials.google_maps_api_key = Some(api_key);
                info!("Google Maps API key loaded from environment");
            }
            _ => {
                warn!(
                    "{} is not set - every tool call will fail with an upstream error",
                    API_KEY_ENV
                );
            }
        }

        if let Ok(base_url) = std::env::var("MCP_MAPS_BASE_URL") {
            info!("Using maps base URL: {}", base_url);
            config.maps.base_url = base_url;
        }

        if let Ok(language) = std::env::var("MCP_MAPS_LANGUAGE") {
            config.maps.language = Some(language).filter(|l| !l.trim().is_empty());
        }

        config
    }

    /// Whether an API key is available for upstream calls.
    pub fn has_api_key(&self) -> bool {
        self.credentials.google_maps_api_key.is_some()
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        let base_url = self.maps.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::config(format!(
                "MCP_MAPS_BASE_URL must be an http(s) URL, got '{}'",
                self.maps.base_url
            )));
        }
        if self.server.name.trim().is_empty() {
            return Err(Error::config("MCP_SERVER_NAME must not be empty"));
        }
        Ok(())
    }
}
