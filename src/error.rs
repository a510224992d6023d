//! Error taxonomy shared by the history store and the weather client.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// History file missing, unreadable or not a JSON array of cities.
    #[error("Failed to read search history {}: {reason}", .path.display())]
    StorageRead { path: PathBuf, reason: String },

    #[error("Failed to write search history {}: {reason}", .path.display())]
    StorageWrite { path: PathBuf, reason: String },

    /// Transport failure or non-success HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream payload is missing a structural part (coordinates, list, city).
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Weather lookup cancelled")]
    Cancelled,
}

impl Error {
    /// Returns a short message suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::StorageRead { .. } => "Search history could not be loaded.",
            Error::StorageWrite { .. } => "Search history could not be saved.",
            Error::Network(_) => "Weather service request failed. Please try again.",
            Error::InvalidResponse(_) => "City not found or weather data incomplete.",
            Error::Config(_) => "Invalid configuration. Check your settings.",
            Error::Cancelled => "The weather lookup was cancelled.",
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::Config(format!("failed to build HTTP client: {}", err))
        } else if err.is_timeout() {
            Error::Network(format!("request timed out: {}", err))
        } else if let Some(status) = err.status() {
            Error::Network(format!("request failed with status {}: {}", status, err))
        } else {
            Error::Network(err.to_string())
        }
    }
}
