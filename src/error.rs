//! Error types for the estimation pipeline

use thiserror::Error;

/// Main error type for the estimator
///
/// Only geocoding failures (and input validation) ever surface through this
/// type; energy-statistics failures are absorbed by the fetcher.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    /// Input rejected before any network call
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoding provider returned zero results
    #[error("Address not found: {query}")]
    NotFound { query: String },

    /// The geocoding provider returned a result we cannot use
    #[error("Invalid location data: {message}")]
    InvalidData { message: String },

    /// Network or HTTP failure while geocoding
    #[error("Geocoding request failed: {0}")]
    Transport(#[from] TransportError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// The three ways a geocoding request can fail on the wire
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The provider answered with a non-success status
    #[error("provider responded with {status} {reason}")]
    Remote { status: u16, reason: String },

    /// Nothing came back (connect failure, timeout, broken body)
    #[error("no response received: {0}")]
    NoResponse(String),

    /// The request could not be constructed locally
    #[error("request could not be built: {0}")]
    Local(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            TransportError::Remote {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown error").to_string(),
            }
        } else if err.is_builder() {
            TransportError::Local(err.to_string())
        } else {
            TransportError::NoResponse(err.to_string())
        }
    }
}

impl EstimatorError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new invalid-data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Stable name of the error kind, used in API responses
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            EstimatorError::Validation { .. } => "ValidationError",
            EstimatorError::NotFound { .. } => "NotFoundError",
            EstimatorError::InvalidData { .. } => "InvalidDataError",
            EstimatorError::Transport(_) => "TransportError",
            EstimatorError::Config { .. } => "ConfigError",
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            EstimatorError::Validation { message } => message.clone(),
            EstimatorError::NotFound { .. } => {
                "Address not found. Please try a different address or postal code.".to_string()
            }
            EstimatorError::InvalidData { .. } => "Invalid location data received".to_string(),
            EstimatorError::Transport(TransportError::Remote { status, reason }) => {
                format!("Server error: {status} - {reason}")
            }
            EstimatorError::Transport(TransportError::NoResponse(_)) => {
                "No response received from the server. Please check your internet connection."
                    .to_string()
            }
            EstimatorError::Transport(TransportError::Local(_)) => {
                "Error validating address. Please try again.".to_string()
            }
            EstimatorError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}
