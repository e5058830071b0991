//! Error types and handling for `ArborAI` application

use thiserror::Error;

/// Main error type for the `ArborAI` application
#[derive(Error, Debug)]
pub enum ArborAiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// External API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl ArborAiError {
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

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ArborAiError::Config { .. } => {
                "Configuration error. Please check your environment variables and API key."
                    .to_string()
            }
            ArborAiError::Api { .. } => {
                "Unable to reach external data services. Please check your internet connection."
                    .to_string()
            }
            ArborAiError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ArborAiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            ArborAiError::General { message } => message.clone(),
        }
    }
}
