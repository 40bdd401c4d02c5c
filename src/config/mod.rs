use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Environment variable holding the document store connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable holding the completion endpoint URL
pub const API_URL_ENV: &str = "API_URL";
/// Environment variable holding the completion bearer token
pub const API_TOKEN_ENV: &str = "API_TOKEN";
/// Environment variable holding the completion model identifier
pub const MODEL_ENV: &str = "MODEL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection string, e.g. `sqlite:planwise.db?mode=rwc`
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionConfig {
    /// Chat-completions endpoint
    #[serde(default)]
    pub api_url: String,
    /// Bearer token sent in the Authorization header
    #[serde(default)]
    pub api_token: String,
    /// Model identifier sent with each request
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load the TOML file if present, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&content).with_context(|| "Failed to parse configuration file")?
        } else {
            info!("No config file found, using defaults");
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overwrite store and completion settings with any non-empty values
    /// returned by `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database.url = url;
        }
        if let Some(url) = lookup(API_URL_ENV) {
            self.completion.api_url = url;
        }
        if let Some(token) = lookup(API_TOKEN_ENV) {
            self.completion.api_token = token;
        }
        if let Some(model) = lookup(MODEL_ENV) {
            self.completion.model = model;
        }
    }

    /// The service refuses to start without a store connection string.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            bail!("{} environment variable not set", DATABASE_URL_ENV);
        }
        Ok(())
    }
}
