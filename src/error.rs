//! Error types for sheltermap

use thiserror::Error;

/// Result type alias for sheltermap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum Error {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Geocoding service errors.
///
/// None of these reach the user during a resolution pass; the resolver
/// substitutes heuristic coordinates instead.
#[derive(Debug, Clone, Error)]
pub enum GeocodeError {
    #[error("Geocoding API key not configured")]
    MissingCredentials,

    #[error("Geocoding request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Geocoding service returned status {0}")]
    Status(String),

    #[error("Geocoding service returned no results")]
    ZeroResults,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeocodeError::Timeout
        } else if err.is_connect() {
            GeocodeError::Network("Failed to connect to geocoding service".to_string())
        } else {
            GeocodeError::Network(err.to_string())
        }
    }
}

/// Shelter directory errors. These abort a resolution pass.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Shelter directory not found: {0}")]
    NotFound(String),

    #[error("No shelter directory configured. Pass --directory or run `sheltermap init`.")]
    NotConfigured,

    #[error("Failed to read shelter directory: {0}")]
    Read(String),

    #[error("Failed to parse shelter directory: {0}")]
    Parse(String),

    #[error("Shelter directory request failed: {0}")]
    Http(String),
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DirectoryError::Http("Request timed out".to_string())
        } else {
            DirectoryError::Http(err.to_string())
        }
    }
}

/// Coordinate cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine cache directory")]
    NoHome,

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Cache database error: {0}")]
    Sqlite(String),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for CacheError {
    fn from(err: rusqlite::Error) -> Self {
        CacheError::Sqlite(err.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `sheltermap init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
