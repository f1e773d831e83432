use std::net::SocketAddr;

use crate::lifecycle::TransitionPolicy;
use crate::telemetry::{LogFormat, TelemetrySettings, DEFAULT_FILTER};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Server settings read from the environment (after `.env` is loaded).
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    pub transition_policy: TransitionPolicy,
    pub run_migrations: bool,
    pub telemetry: TelemetrySettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8000)))?;
        let transition_policy =
            parse_or(&lookup, "TRANSLATION_TRANSITIONS", TransitionPolicy::Permissive)?;
        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", true)?;
        let log_format = parse_or(&lookup, "RUST_LOG_FORMAT", LogFormat::Text)?;

        Ok(Self {
            database_url,
            bind_addr,
            cors_origin: lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".into()),
            transition_policy,
            run_migrations,
            telemetry: TelemetrySettings {
                log_format,
                filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_FILTER.into()),
                otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT"),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}
