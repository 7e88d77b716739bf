//! Error types for the Haven console.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Errors that can occur during console operation.
///
/// This is the primary error type for the crate, encompassing all failure
/// modes of the binary. Individual backend-call failures are surfaced
/// inline on the page that triggered them and never reach this type.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend API error that escaped page-level handling.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// TUI-related error.
    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Errors that can occur during TUI operation.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal initialization failed.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal rendering failed.
    #[error("render error: {0}")]
    Render(#[source] std::io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(String),
}

/// A specialized `Result` type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConsoleError::Config(ConfigError::MissingEnvVar("HAVEN_SERVER_URL".to_string()));
        assert_eq!(
            err.to_string(),
            "configuration error: missing required environment variable: HAVEN_SERVER_URL"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConsoleError = io_err.into();
        assert!(matches!(err, ConsoleError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn tui_error_display() {
        let io_err = std::io::Error::other("raw mode failed");
        let err = TuiError::TerminalInit(io_err);
        assert_eq!(
            err.to_string(),
            "failed to initialize terminal: raw mode failed"
        );
    }

    #[test]
    fn tui_error_source_chain() {
        use std::error::Error;

        let io_err = std::io::Error::other("write failed");
        let err = TuiError::Render(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn tui_error_to_console_error_conversion() {
        let tui_err = TuiError::Event("poll failed".to_string());
        let err: ConsoleError = tui_err.into();
        assert!(matches!(err, ConsoleError::Tui(_)));
        assert_eq!(err.to_string(), "TUI error: event error: poll failed");
    }
}
