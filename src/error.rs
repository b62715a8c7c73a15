//! Error types and handling for the Skycast application

use thiserror::Error;

/// Main error type for the Skycast application
#[derive(Error, Debug)]
pub enum SkycastError {
    /// Configuration-related errors (missing environment variables)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors (e.g. malformed coordinate strings)
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl SkycastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkycastError::Config { message } => message.clone(),
            SkycastError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            SkycastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}
