// Process-wide configuration, loaded once at startup from the environment

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// SMTP connection settings
#[derive(Clone, Debug, Default)]
pub struct MailerConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    pub api_prefix: String,
    pub api_version: String,
    pub jwt_secret: String,
    pub auth_expires_days: i64,
    pub cookie_domain: Option<String>,
    pub cookie_is_secure: bool,
    pub rate_limiter_max_override: Option<u32>,
    pub mailer: MailerConfig,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let jwt_secret = match optional("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                "dev-secret-key".to_string()
            }
        };

        Ok(Self {
            database_url: optional("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            server_host: optional("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or("SERVER_PORT", 3000)?,
            api_prefix: optional("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            api_version: optional("API_VERSION").unwrap_or_else(|| "/v1".to_string()),
            jwt_secret,
            auth_expires_days: parse_or("AUTH_EXPIRES_DAYS", 365)?,
            cookie_domain: optional("COOKIE_DOMAIN"),
            cookie_is_secure: parse_or("COOKIE_IS_SECURE", false)?,
            rate_limiter_max_override: parse_optional("RATE_LIMITER_MAX_OVERRIDE")?,
            mailer: MailerConfig {
                host: optional("MAILER_HOST"),
                port: parse_or("MAILER_PORT", 587)?,
                username: optional("MAILER_USERNAME"),
                password: optional("MAILER_PASSWORD"),
                from: optional("MAILER_FROM"),
            },
        })
    }

    /// Route prefix shared by every API router, e.g. `/api/v1`
    pub fn api_base_path(&self) -> String {
        format!("{}{}", self.api_prefix, self.api_version)
    }
}

impl Default for Config {
    /// Development defaults, used by tests
    fn default() -> Self {
        Self {
            database_url: String::new(),
            database_max_connections: 5,
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            api_prefix: "/api".to_string(),
            api_version: "/v1".to_string(),
            jwt_secret: "dev-secret-key".to_string(),
            auth_expires_days: 365,
            cookie_domain: None,
            cookie_is_secure: false,
            rate_limiter_max_override: None,
            mailer: MailerConfig {
                port: 587,
                ..Default::default()
            },
        }
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    optional(name)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::Invalid { name, value })
        })
        .transpose()
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    Ok(parse_optional(name)?.unwrap_or(default))
}
