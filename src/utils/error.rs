// src/utils/error.rs
use std::io;
use thiserror::Error;

/// Main error type for the monitoring application
///
/// Covers configuration problems detected at startup as well as the
/// per-device failures that are recovered inside a single poll cycle.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Device list file or command line parameter errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Status read failed (non-2xx response or unusable body)
    #[error("Status fetch failed: {0}")]
    FetchError(String),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Device address parsing errors
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Rolling log file could not be opened
    #[error("Log sink error: {0}")]
    LogSinkError(String),
}

/// Converts rolling file appender initialisation failures into MonitorError
impl From<tracing_appender::rolling::InitError> for MonitorError {
    fn from(e: tracing_appender::rolling::InitError) -> Self {
        MonitorError::LogSinkError(format!("Failed to open log file: {}", e))
    }
}
