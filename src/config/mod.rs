//! Configuration management for GoldCatalog
//!
//! Loads from config files + environment variables via .env

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::oracle::{DEFAULT_FALLBACK_PRICE_PER_GRAM, DEFAULT_FEED_TIMEOUT, DEFAULT_FEED_URL};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub oracle: OracleConfig,
    pub catalog: CatalogConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Spot gold endpoint (price per troy ounce)
    pub feed_url: String,
    /// Upper bound on one feed request in milliseconds
    pub timeout_ms: u64,
    /// Price per gram served until the first successful fetch
    pub fallback_price_per_gram: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file; missing file falls back to the sample catalog
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable text
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Server defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Oracle defaults
            .set_default("oracle.feed_url", DEFAULT_FEED_URL)?
            .set_default("oracle.timeout_ms", DEFAULT_FEED_TIMEOUT.as_millis() as u64)?
            .set_default(
                "oracle.fallback_price_per_gram",
                DEFAULT_FALLBACK_PRICE_PER_GRAM.to_string(),
            )?
            // Catalog defaults
            .set_default("catalog.path", "data/products.json")?
            // CORS defaults
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            // Logging defaults
            .set_default("logging.json", false)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (GOLDCATALOG__*)
            .add_source(
                Environment::with_prefix("GOLDCATALOG")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(app_config)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.oracle.feed_url.trim().is_empty() {
            bail!("oracle.feed_url must not be empty");
        }
        if self.oracle.timeout_ms == 0 {
            bail!("oracle.timeout_ms must be positive");
        }
        if self.oracle.fallback_price_per_gram <= Decimal::ZERO {
            bail!(
                "oracle.fallback_price_per_gram must be positive, got {}",
                self.oracle.fallback_price_per_gram
            );
        }
        if self.catalog.path.trim().is_empty() {
            bail!("catalog.path must not be empty");
        }
        Ok(())
    }

    /// Generate a digest of the config for logging
    pub fn digest(&self) -> String {
        format!(
            "listen={}:{} feed={} timeout_ms={} fallback_per_gram={} catalog={} cors_origins={}",
            self.server.host,
            self.server.port,
            self.oracle.feed_url,
            self.oracle.timeout_ms,
            self.oracle.fallback_price_per_gram,
            self.catalog.path,
            if self.cors.allowed_origins.is_empty() {
                "*".to_string()
            } else {
                self.cors.allowed_origins.join(",")
            }
        )
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            oracle: OracleConfig {
                feed_url: DEFAULT_FEED_URL.to_string(),
                timeout_ms: DEFAULT_FEED_TIMEOUT.as_millis() as u64,
                fallback_price_per_gram: DEFAULT_FALLBACK_PRICE_PER_GRAM,
            },
            catalog: CatalogConfig {
                path: "data/products.json".to_string(),
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
            logging: LoggingConfig { json: false },
        }
    }
}
