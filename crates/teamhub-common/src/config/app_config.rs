//! Application configuration structs
//!
//! Values come from environment variables (after loading `.env`), are
//! layered through the `config` crate, and deserialized into [`AppConfig`].
//! Anything not set falls back to the serde defaults below.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: Environment::default(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn normalize(raw: &str) -> Option<&'static str> {
        match raw.trim().to_lowercase().as_str() {
            "production" | "prod" => Some("production"),
            "staging" => Some("staging"),
            "development" | "dev" => Some("development"),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Directory with SQL migrations applied at startup; unset skips migrations
    #[serde(default)]
    pub migrations_dir: Option<String>,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT verification settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "teamhub".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Environment variable to config key
const ENV_KEYS: &[(&str, &str)] = &[
    ("APP_NAME", "app.name"),
    ("API_HOST", "api.host"),
    ("API_PORT", "api.port"),
    ("API_REQUEST_TIMEOUT_SECS", "api.request_timeout_secs"),
    ("DATABASE_URL", "database.url"),
    ("DATABASE_MAX_CONNECTIONS", "database.max_connections"),
    ("DATABASE_MIN_CONNECTIONS", "database.min_connections"),
    ("DATABASE_MIGRATIONS_DIR", "database.migrations_dir"),
    ("REDIS_URL", "redis.url"),
    ("REDIS_MAX_CONNECTIONS", "redis.max_connections"),
    ("JWT_SECRET", "jwt.secret"),
    ("JWT_ACCESS_TOKEN_EXPIRY", "jwt.access_token_expiry"),
    ("RATE_LIMIT_REQUESTS_PER_SECOND", "rate_limit.requests_per_second"),
    ("RATE_LIMIT_BURST", "rate_limit.burst"),
    ("WORKER_ID", "snowflake.worker_id"),
];

const REQUIRED: &[&str] = &["API_PORT", "DATABASE_URL", "REDIS_URL", "JWT_SECRET"];

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (environment, test maps)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in REQUIRED.iter().copied() {
            if lookup(key).map_or(true, |v| v.trim().is_empty()) {
                return Err(ConfigError::MissingVar(key));
            }
        }

        let mut builder = ::config::Config::builder();
        for &(var, key) in ENV_KEYS {
            builder = builder.set_override_option(key, lookup(var))?;
        }

        if let Some(raw) = lookup("APP_ENV") {
            let env = Environment::normalize(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("APP_ENV", raw.clone()))?;
            builder = builder.set_override("app.env", env)?;
        }

        if let Some(raw) = lookup("CORS_ALLOWED_ORIGINS") {
            let origins: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            builder = builder.set_override("cors.allowed_origins", origins)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}
