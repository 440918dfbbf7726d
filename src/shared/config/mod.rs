//! Application configuration module
//!
//! `AppConfig` is built once at startup and handed to the server inside
//! `AppState`. Nothing reads settings from a global.
//!
//! # Sources
//!
//! - [`AppConfig::from_env`] reads process environment variables (the binary
//!   loads `.env` through `dotenv` first).
//! - [`AppConfig::from_toml_str`] / [`AppConfig::from_file`] read a TOML
//!   document whose keys are the lower-case field names.
//! - [`AppConfig::builder`] for tests and embedding.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite://bookclub.db` |
//! | `JWT_SECRET` | required |
//! | `FRONTEND_URL` | `http://localhost:5173` (comma-separated list) |
//! | `OPEN_LIBRARY_API_URL` | `https://openlibrary.org` |
//! | `SERVER_PORT` | `8000` |
//! | `MAX_GROUP_MEMBERS` | `32` |
//! | `MAX_COMMENT_LENGTH` | `1000` |

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://bookclub.db";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
pub const DEFAULT_OPEN_LIBRARY_URL: &str = "https://openlibrary.org";
pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_MAX_GROUP_MEMBERS: u32 = 32;
pub const DEFAULT_MAX_COMMENT_LENGTH: usize = 1000;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// sqlx connection string for the SQLite database
    pub database_url: String,
    /// HS256 secret shared with the identity provider that issues bearer tokens
    pub jwt_secret: String,
    /// Origins allowed by CORS
    pub frontend_origins: Vec<String>,
    /// Base URL of the Open Library API
    pub open_library_url: String,
    pub server_port: u16,
    /// Members allowed per group
    pub max_group_members: u32,
    /// Characters allowed per comment
    pub max_comment_length: usize,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingValue` if `JWT_SECRET` is unset, or
    /// `ConfigError::InvalidNumber` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Ok(origins) = std::env::var("FRONTEND_URL") {
            builder = builder.frontend_origins(split_origins(&origins));
        }
        if let Ok(url) = std::env::var("OPEN_LIBRARY_API_URL") {
            builder = builder.open_library_url(url);
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            builder = builder.server_port(parse_number("SERVER_PORT", &port)?);
        }
        if let Ok(max) = std::env::var("MAX_GROUP_MEMBERS") {
            builder = builder.max_group_members(parse_number("MAX_GROUP_MEMBERS", &max)?);
        }
        if let Ok(max) = std::env::var("MAX_COMMENT_LENGTH") {
            builder = builder.max_comment_length(parse_number("MAX_COMMENT_LENGTH", &max)?);
        }

        builder.build()
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;
        let mut builder = AppConfig::builder();

        if let Some(url) = file.database_url {
            builder = builder.database_url(url);
        }
        if let Some(secret) = file.jwt_secret {
            builder = builder.jwt_secret(secret);
        }
        if let Some(origins) = file.frontend_origins {
            builder = builder.frontend_origins(origins);
        }
        if let Some(url) = file.open_library_url {
            builder = builder.open_library_url(url);
        }
        if let Some(port) = file.server_port {
            builder = builder.server_port(port);
        }
        if let Some(max) = file.max_group_members {
            builder = builder.max_group_members(max);
        }
        if let Some(max) = file.max_comment_length {
            builder = builder.max_comment_length(max);
        }

        builder.build()
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.database_url.is_empty() {
            return Err(ConfigError::MissingValue("database_url"));
        }
        for origin in self.frontend_origins.iter().chain(std::iter::once(&self.open_library_url)) {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(origin.clone()));
            }
        }
        if self.max_group_members == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "max_group_members",
                value: "0".to_string(),
            });
        }
        if self.max_comment_length == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "max_comment_length",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    frontend_origins: Option<Vec<String>>,
    open_library_url: Option<String>,
    server_port: Option<u16>,
    max_group_members: Option<u32>,
    max_comment_length: Option<usize>,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn frontend_origins(mut self, origins: Vec<String>) -> Self {
        self.frontend_origins = Some(origins);
        self
    }

    pub fn open_library_url(mut self, url: impl Into<String>) -> Self {
        self.open_library_url = Some(url.into());
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn max_group_members(mut self, max: u32) -> Self {
        self.max_group_members = Some(max);
        self
    }

    pub fn max_comment_length(mut self, max: usize) -> Self {
        self.max_comment_length = Some(max);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("jwt_secret"))?,
            frontend_origins: self
                .frontend_origins
                .unwrap_or_else(|| vec![DEFAULT_FRONTEND_URL.to_string()]),
            open_library_url: self
                .open_library_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPEN_LIBRARY_URL.to_string()),
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
            max_group_members: self.max_group_members.unwrap_or(DEFAULT_MAX_GROUP_MEMBERS),
            max_comment_length: self.max_comment_length.unwrap_or(DEFAULT_MAX_COMMENT_LENGTH),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    frontend_origins: Option<Vec<String>>,
    open_library_url: Option<String>,
    server_port: Option<u16>,
    max_group_members: Option<u32>,
    max_comment_length: Option<usize>,
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid number for {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("could not read config file {0}")]
    Io(String),
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
}
