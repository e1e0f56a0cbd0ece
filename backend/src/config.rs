//! Configuration management for the Stadium Rain-Check server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with RAINCHECK_ prefix

use chrono::NaiveDate;
use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Forecast provider configuration
    pub weather: WeatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Provider key exactly as issued in URL-encoded form
    #[serde(default)]
    pub service_key_encoded: Option<String>,

    /// Provider key in decoded form
    #[serde(default)]
    pub service_key: Option<String>,

    /// Short-term (village) forecast service
    pub short_term_base_url: String,

    /// Mid-term forecast service
    pub mid_term_base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Offset of the provider's local time from UTC
    pub utc_offset_hours: i32,

    /// Pin "today" to this date (YYYY-MM-DD), for demos and tests
    #[serde(default)]
    pub today_override: Option<String>,
}

/// Provider credential in the form it must be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceKey {
    /// Already URL-encoded; appended to the URL verbatim
    Encoded(String),
    /// Plain key; encoded by the HTTP client
    Raw(String),
}

impl WeatherConfig {
    /// The credential to use, preferring the encoded form when both are set
    pub fn service_key(&self) -> Option<ServiceKey> {
        let non_blank = |key: &Option<String>| {
            key.as_ref()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        };

        non_blank(&self.service_key_encoded)
            .map(ServiceKey::Encoded)
            .or_else(|| non_blank(&self.service_key).map(ServiceKey::Raw))
    }

    /// Parsed `today_override`, if set and valid
    pub fn today_override(&self) -> Result<Option<NaiveDate>, shared::InputError> {
        self.today_override
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(shared::parse_game_date)
            .transpose()
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("RAINCHECK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.url", "postgres://localhost/rain_check")?
            .set_default("database.max_connections", 5)?
            .set_default("database.min_connections", 1)?
            .set_default(
                "weather.short_term_base_url",
                "http://apis.data.go.kr/1360000/VilageFcstInfoService_2.0",
            )?
            .set_default(
                "weather.mid_term_base_url",
                "http://apis.data.go.kr/1360000/MidFcstInfoService",
            )?
            .set_default("weather.request_timeout_secs", 10)?
            .set_default("weather.utc_offset_hours", 9)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RAINCHECK_ prefix)
            .add_source(
                Environment::with_prefix("RAINCHECK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            service_key_encoded: None,
            service_key: None,
            short_term_base_url: "http://apis.data.go.kr/1360000/VilageFcstInfoService_2.0"
                .to_string(),
            mid_term_base_url: "http://apis.data.go.kr/1360000/MidFcstInfoService".to_string(),
            request_timeout_secs: 10,
            utc_offset_hours: 9,
            today_override: None,
        }
    }
}
