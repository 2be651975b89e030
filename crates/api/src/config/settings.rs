//! Application settings loaded from environment variables.

use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use common::{DatabaseConfig, JwtConfig, ScraperConfig, SearchConfig, ServiceConfig};
use domain::{is_text_search_config, MIN_JWT_SECRET_LENGTH};
use thiserror::Error;

/// Signing key used only by debug builds when `JWT_SECRET` is unset.
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// One hour up to one year.
const JWT_EXPIRATION_HOURS_RANGE: RangeInclusive<i64> = 1..=8760;

const SCRAPER_TIMEOUT_SECS_RANGE: RangeInclusive<u64> = 1..=300;

/// Configuration problems detected at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable must be set")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {} characters long", MIN_JWT_SECRET_LENGTH)]
    JwtSecretTooShort,

    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub scraper: ScraperConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from the process environment (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::MissingJwtSecret),
        };

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::JwtSecretTooShort);
        }

        let server_defaults = ServiceConfig::default();
        let db_defaults = DatabaseConfig::default();
        let jwt_defaults = JwtConfig::default();
        let scraper_defaults = ScraperConfig::default();
        let search_defaults = SearchConfig::default();

        let search_language = lookup("SEARCH_LANGUAGE").unwrap_or(search_defaults.language);
        if !is_text_search_config(&search_language) {
            return Err(ConfigError::InvalidValue {
                name: "SEARCH_LANGUAGE",
                value: search_language,
            });
        }

        Ok(Self {
            server: ServiceConfig {
                service_name: server_defaults.service_name,
                host: lookup("SERVER_HOST").unwrap_or(server_defaults.host),
                port: parse_or(&lookup, "SERVER_PORT", server_defaults.port)?,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL")
                    .or_else(|| lookup("CONN_URL"))
                    .unwrap_or(db_defaults.url),
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    db_defaults.max_connections,
                )?,
                min_connections: parse_or(
                    &lookup,
                    "DATABASE_MIN_CONNECTIONS",
                    db_defaults.min_connections,
                )?,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expiration_hours: parse_in_range(
                    &lookup,
                    "JWT_EXPIRATION_HOURS",
                    jwt_defaults.expiration_hours,
                    JWT_EXPIRATION_HOURS_RANGE,
                )?,
            },
            scraper: ScraperConfig {
                base_url: lookup("SCRAPER_URL").unwrap_or(scraper_defaults.base_url),
                timeout_secs: parse_in_range(
                    &lookup,
                    "SCRAPER_TIMEOUT_SECS",
                    scraper_defaults.timeout_secs,
                    SCRAPER_TIMEOUT_SECS_RANGE,
                )?,
            },
            search: SearchConfig {
                language: search_language,
                result_limit: search_defaults.result_limit,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

/// Like [`parse_or`], but values outside `range` are rejected too.
fn parse_in_range<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Display,
{
    let value = parse_or(lookup, name, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        })
    }
}
