//! Application configuration module
//!
//! Configuration is read from an optional TOML file (path in
//! `SCOUTLINK_CONFIG`) and then overridden by environment variables, so a
//! `.env` file or container environment always wins over the file.
//!
//! | Key             | Env var        | Default  |
//! |-----------------|----------------|----------|
//! | `server_port`   | `SERVER_PORT`  | `3000`   |
//! | `database_url`  | `DATABASE_URL` | unset    |
//! | `jwt_secret`    | `JWT_SECRET`   | dev key  |
//! | `jwt_ttl_days`  | `JWT_TTL_DAYS` | `30`     |
//! | `static_dir`    | `STATIC_DIR`   | `public` |
//! | `cors_origins`  | `CORS_ORIGINS` | any      |
//! | `log_filter`    | `RUST_LOG`     | `info`   |
//!
//! The development key is only accepted by debug builds. A release build
//! refuses to start until `JWT_SECRET` (or `jwt_secret`) is set.

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_JWT_TTL_DAYS: i64 = 30;
pub const DEV_JWT_SECRET: &str = "scoutlink-dev-secret-change-in-production";

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub server_port: u16,
    /// PostgreSQL connection string; storage routes answer 503 without it
    pub database_url: Option<String>,
    /// HMAC secret for signing access tokens
    pub jwt_secret: String,
    /// Access token lifetime in days
    pub jwt_ttl_days: i64,
    /// Directory with the built single-page client
    pub static_dir: String,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_ttl_days: DEFAULT_JWT_TTL_DAYS,
            static_dir: "public".to_string(),
            cors_origins: Vec::new(),
            log_filter: "info".to_string(),
        }
    }
}

/// Shape of the optional TOML configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    server_port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    jwt_ttl_days: Option<i64>,
    static_dir: Option<String>,
    cors_origins: Option<Vec<String>>,
    log_filter: Option<String>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the optional TOML file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = match std::env::var("SCOUTLINK_CONFIG") {
            Ok(path) => {
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ConfigError::Io(path.clone(), e.to_string()))?;
                AppConfigBuilder::from_toml_str(&contents)?
            }
            Err(_) => AppConfigBuilder::default(),
        };
        builder = builder.apply_env(|key| std::env::var(key).ok())?;
        let config = builder.build()?;
        config.check_secret(cfg!(debug_assertions))?;
        Ok(config)
    }

    /// Reject the published development secret unless explicitly allowed
    pub fn check_secret(&self, allow_dev_secret: bool) -> Result<(), ConfigError> {
        if !allow_dev_secret && self.jwt_secret == DEV_JWT_SECRET {
            return Err(ConfigError::InsecureSecret);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_port == 0 {
            return Err(ConfigError::InvalidValue("server_port", "must be non-zero".into()));
        }
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.jwt_ttl_days <= 0 {
            return Err(ConfigError::InvalidValue("jwt_ttl_days", "must be positive".into()));
        }
        if let Some(url) = &self.database_url {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    jwt_ttl_days: Option<i64>,
    static_dir: Option<String>,
    cors_origins: Option<Vec<String>>,
    log_filter: Option<String>,
}

impl AppConfigBuilder {
    /// Start from the contents of a TOML file
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self {
            server_port: file.server_port,
            database_url: file.database_url,
            jwt_secret: file.jwt_secret,
            jwt_ttl_days: file.jwt_ttl_days,
            static_dir: file.static_dir,
            cors_origins: file.cors_origins,
            log_filter: file.log_filter,
        })
    }

    /// Override values with whatever `lookup` returns for the known env vars
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("SERVER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", port.clone()))?;
            self.server_port = Some(port);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = Some(secret);
        }
        if let Some(days) = lookup("JWT_TTL_DAYS") {
            let days = days
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue("JWT_TTL_DAYS", days.clone()))?;
            self.jwt_ttl_days = Some(days);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.static_dir = Some(dir);
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors_origins = Some(
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
            );
        }
        if let Some(filter) = lookup("RUST_LOG") {
            self.log_filter = Some(filter);
        }
        Ok(self)
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn jwt_ttl_days(mut self, days: i64) -> Self {
        self.jwt_ttl_days = Some(days);
        self
    }

    pub fn static_dir(mut self, dir: impl Into<String>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_port: self.server_port.unwrap_or(defaults.server_port),
            database_url: self.database_url,
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            jwt_ttl_days: self.jwt_ttl_days.unwrap_or(defaults.jwt_ttl_days),
            static_dir: self.static_dir.unwrap_or(defaults.static_dir),
            cors_origins: self.cors_origins.unwrap_or(defaults.cors_origins),
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error("failed to read config file {0}: {1}")]
    Io(String, String),
    #[error("JWT_SECRET must be set; the development secret is only allowed in debug builds")]
    InsecureSecret,
}
