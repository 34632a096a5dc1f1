use chrono::NaiveDate;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
///
/// Every section has defaults, so the service starts with no config files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Where camp records come from
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// JSON array of camp records replacing the built-in demo catalog
    pub catalog_file: Option<String>,
    /// `{"sources": [...]}` list of remote JSON feeds
    pub sources_file: Option<String>,
    #[serde(default = "default_zip_codes_file")]
    pub zip_codes_file: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            catalog_file: None,
            sources_file: None,
            zip_codes_file: default_zip_codes_file(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_zip_codes_file() -> String { "data/zip_codes.json".to_string() }
fn default_request_timeout() -> u64 { 30 }
fn default_user_agent() -> String { format!("camp-finder/{}", env!("CARGO_PKG_VERSION")) }

/// PostgreSQL connection; feedback and bookings are not persisted without `url`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Catalog cache; Redis is optional, the in-memory tier is always on
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

/// Bounds applied to incoming search requests
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_min_age")]
    pub min_age: u8,
    #[serde(default = "default_max_age")]
    pub max_age: u8,
    #[serde(default = "default_radius")]
    pub default_radius_miles: f64,
    #[serde(default = "default_max_radius")]
    pub max_radius_miles: f64,
    #[serde(default = "default_max_price")]
    pub default_max_price: f64,
    #[serde(default = "default_season_start")]
    pub season_start: NaiveDate,
    #[serde(default = "default_season_end")]
    pub season_end: NaiveDate,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            max_age: default_max_age(),
            default_radius_miles: default_radius(),
            max_radius_miles: default_max_radius(),
            default_max_price: default_max_price(),
            season_start: default_season_start(),
            season_end: default_season_end(),
            max_results: default_max_results(),
        }
    }
}

fn default_min_age() -> u8 { 3 }
fn default_max_age() -> u8 { 18 }
fn default_radius() -> f64 { 5.0 }
fn default_max_radius() -> f64 { 20.0 }
fn default_max_price() -> f64 { 500.0 }
fn default_season_start() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default() }
fn default_season_end() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 8, 31).unwrap_or_default() }
fn default_max_results() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_capacity")]
    pub capacity: u64,
    #[serde(default = "default_session_idle")]
    pub idle_timeout_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            capacity: default_session_capacity(),
            idle_timeout_secs: default_session_idle(),
        }
    }
}

fn default_session_capacity() -> u64 { 10_000 }
fn default_session_idle() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CAMPS__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CAMPS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CAMPS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CAMPS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honor the conventional DATABASE_URL and REDIS_URL variables
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }

    builder.build()
}
