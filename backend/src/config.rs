//! Configuration management for the Hazard Relay
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with HAZARD__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";
pub const DEFAULT_CHATBOT_URL: &str = "https://chatbot-nasa-7ikr.onrender.com/chatbot";
pub const DEFAULT_ML_PREDICT_URL: &str = "https://nasa-hackathon-ml-model.streamlit.app/predict";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream services the relay talks to
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// USGS GeoJSON summary feed
    pub feed_url: String,

    /// Chatbot endpoint receiving `{question}`
    pub chatbot_url: String,

    /// ML inference endpoint for impact predictions
    pub ml_predict_url: String,

    /// Per-call timeout for every outbound request, in seconds
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("HAZARD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("upstream.feed_url", DEFAULT_FEED_URL)?
            .set_default("upstream.chatbot_url", DEFAULT_CHATBOT_URL)?
            .set_default("upstream.ml_predict_url", DEFAULT_ML_PREDICT_URL)?
            .set_default("upstream.timeout_secs", 15)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (HAZARD__ prefix)
            .add_source(
                Environment::with_prefix("HAZARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            chatbot_url: DEFAULT_CHATBOT_URL.to_string(),
            ml_predict_url: DEFAULT_ML_PREDICT_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_public_services() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert!(config.upstream.feed_url.ends_with("all_day.geojson"));
        assert_eq!(config.upstream.timeout(), Duration::from_secs(15));
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }
}
