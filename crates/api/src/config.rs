use axum::http::HeaderValue;
use bhv360_core::channels::{parse_channel_list, Channel};

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {var} ('{value}'): {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Deadline for one channel attempt in seconds (default: `20`). Always
    /// shorter than the request timeout.
    pub channel_timeout_secs: u64,
    /// Notifications of a bulk request delivered concurrently (default: `16`).
    pub bulk_concurrency: usize,
    /// Channels used when a notification does not name its own.
    pub default_channels: Vec<Channel>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `CHANNEL_TIMEOUT_SECS` | `20`                       |
    /// | `BULK_CONCURRENCY`     | `16`                       |
    /// | `DEFAULT_CHANNELS`     | `push`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        host.parse::<std::net::IpAddr>()
            .map_err(|e| invalid("HOST", &host, e))?;

        let port = parse_var(&lookup, "PORT", 3000u16)?;
        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let channel_timeout_secs = parse_var(&lookup, "CHANNEL_TIMEOUT_SECS", 20u64)?;
        if channel_timeout_secs == 0 || channel_timeout_secs >= request_timeout_secs {
            return Err(invalid(
                "CHANNEL_TIMEOUT_SECS",
                &channel_timeout_secs.to_string(),
                format!("must be between 1 and REQUEST_TIMEOUT_SECS ({request_timeout_secs}), exclusive"),
            ));
        }
        let bulk_concurrency = parse_var(&lookup, "BULK_CONCURRENCY", 16usize)?;
        if bulk_concurrency == 0 {
            return Err(invalid("BULK_CONCURRENCY", "0", "must be at least 1"));
        }

        let cors_raw = lookup("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:3000".into());
        let cors_origins: Vec<String> = cors_raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| invalid("CORS_ORIGINS", origin, e))?;
        }

        let channels_raw = lookup("DEFAULT_CHANNELS").unwrap_or_else(|| "push".into());
        let default_channels =
            parse_channel_list(&channels_raw).map_err(|e| invalid("DEFAULT_CHANNELS", &channels_raw, e))?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            channel_timeout_secs,
            bulk_concurrency,
            default_channels,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|e| invalid(var, &raw, e)),
        None => Ok(default),
    }
}

fn invalid(var: &'static str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
