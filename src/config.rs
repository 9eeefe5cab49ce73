//! Runtime configuration, read from the environment (and `.env` when present).
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | unset: in-memory order store |
//! | `ORDER_REQUEST_TIMEOUT_MS` | `3000` |
//! | `ORDER_CHANNEL_BUFFER` | `32` |
//! | `ORDER_DB_MAX_CONNECTIONS` | `5` |

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderServiceConfig {
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub request_timeout: Duration,
    /// Mailbox size of every actor.
    pub channel_buffer: usize,
    pub db_max_connections: u32,
}

impl Default for OrderServiceConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            request_timeout: Duration::from_millis(3000),
            channel_buffer: 32,
            db_max_connections: 5,
        }
    }
}

impl OrderServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine.
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|name| env::var(name).ok())?;
        tracing::info!(
            persistent = config.database_url.is_some(),
            timeout_ms = config.request_timeout.as_millis() as u64,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let timeout_ms: u64 = parse_or(
            &lookup,
            "ORDER_REQUEST_TIMEOUT_MS",
            defaults.request_timeout.as_millis() as u64,
        )?;
        let channel_buffer: usize =
            parse_or(&lookup, "ORDER_CHANNEL_BUFFER", defaults.channel_buffer)?;
        let db_max_connections: u32 = parse_or(
            &lookup,
            "ORDER_DB_MAX_CONNECTIONS",
            defaults.db_max_connections,
        )?;

        // Zero would make every deadline expire immediately or stall the channels.
        for (name, value) in [
            ("ORDER_REQUEST_TIMEOUT_MS", timeout_ms),
            ("ORDER_CHANNEL_BUFFER", channel_buffer as u64),
            ("ORDER_DB_MAX_CONNECTIONS", u64::from(db_max_connections)),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    name,
                    value: "0".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(Self {
            database_url,
            request_timeout: Duration::from_millis(timeout_ms),
            channel_buffer,
            db_max_connections,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
