//! Configuration for the Haven console.
//!
//! Configuration comes from environment variables, with command-line flags
//! taking precedence where both exist.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `HAVEN_SERVER_URL` | Yes | - | Base URL of the Haven server (e.g., `https://haven.local`) |
//! | `HAVEN_ROUTE` | No | `overview` | Route to open on startup |
//! | `HAVEN_TICK_MS` | No | 60 | TUI tick interval in milliseconds |

use std::env;

use thiserror::Error;

/// Default startup route.
const DEFAULT_ROUTE: &str = "overview";

/// Default TUI tick interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 60;

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Configuration for the Haven console.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Haven server, without a trailing slash.
    pub server_url: String,

    /// Route to open on startup.
    pub route: String,

    /// TUI tick interval in milliseconds.
    pub tick_ms: u64,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `HAVEN_SERVER_URL` is not set
    /// - `HAVEN_TICK_MS` is set but is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        // Required: HAVEN_SERVER_URL
        let server_url = env::var("HAVEN_SERVER_URL")
            .map_err(|_| ConfigError::MissingEnvVar("HAVEN_SERVER_URL".to_string()))?;
        let server_url = server_url.trim_end_matches('/').to_string();

        // Optional: HAVEN_ROUTE (default: overview)
        let route = env::var("HAVEN_ROUTE").unwrap_or_else(|_| DEFAULT_ROUTE.to_string());

        // Optional: HAVEN_TICK_MS (default: 60, must be > 0)
        let tick_ms = match env::var("HAVEN_TICK_MS") {
            Ok(val) => {
                let ms = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "HAVEN_TICK_MS".to_string(),
                    message: format!("expected positive integer, got '{val}'"),
                })?;
                if ms == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "HAVEN_TICK_MS".to_string(),
                        message: "tick interval must be greater than 0".to_string(),
                    });
                }
                ms
            }
            Err(_) => DEFAULT_TICK_MS,
        };

        Ok(Self {
            server_url,
            route,
            tick_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("HAVEN_SERVER_URL");
        env::remove_var("HAVEN_ROUTE");
        env::remove_var("HAVEN_TICK_MS");
    }

    #[test]
    #[serial]
    fn from_env_requires_server_url() {
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        assert!(err.to_string().contains("HAVEN_SERVER_URL"));
    }

    #[test]
    #[serial]
    fn from_env_applies_defaults() {
        clear_env();
        env::set_var("HAVEN_SERVER_URL", "https://haven.local");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server_url, "https://haven.local");
        assert_eq!(config.route, "overview");
        assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
    }

    #[test]
    #[serial]
    fn from_env_strips_trailing_slash() {
        clear_env();
        env::set_var("HAVEN_SERVER_URL", "https://haven.local/");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server_url, "https://haven.local");
    }

    #[test]
    #[serial]
    fn from_env_rejects_bad_tick() {
        clear_env();
        env::set_var("HAVEN_SERVER_URL", "https://haven.local");
        env::set_var("HAVEN_TICK_MS", "fast");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        env::set_var("HAVEN_TICK_MS", "0");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    #[serial]
    fn from_env_reads_route() {
        clear_env();
        env::set_var("HAVEN_SERVER_URL", "https://haven.local");
        env::set_var("HAVEN_ROUTE", "security-logs");

        let config = Config::from_env().unwrap();
        assert_eq!(config.route, "security-logs");
    }
}
