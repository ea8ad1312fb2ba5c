//! Error types for the application.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    MissingVar { name: String },

    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

/// Forecast provider errors.
///
/// Each failure mode of a fetch surfaces as its own variant so callers can
/// decide what is user-visible. Only `EmptyForecast` is: the provider
/// answered but had no daily entry for tomorrow.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Forecast request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Forecast provider returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse forecast response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Forecast response missing expected data: {what}")]
    MissingData { what: &'static str },

    #[error("No forecast entries available for tomorrow")]
    EmptyForecast,
}

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for forecast operations.
pub type ForecastResult<T> = std::result::Result<T, ForecastError>;
