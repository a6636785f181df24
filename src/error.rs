//! Error types for scope composition.

use thiserror::Error;

/// HTTP status used for client-side validation failures
pub const UNPROCESSABLE_ENTITY: u16 = 422;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScopeError {
    #[error("Validation error ({status}): {message}")]
    Validation { status: u16, message: String },
    #[error("Format error: {0}")]
    Format(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl ScopeError {
    /// Build a 422 validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ScopeError::Validation {
            status: UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    /// HTTP status code a web layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ScopeError::Validation { status, .. } => *status,
            ScopeError::Format(_) => UNPROCESSABLE_ENTITY,
            ScopeError::Configuration(_) | ScopeError::Database(_) => 500,
        }
    }

    /// Whether the error was caused by client input rather than the host application
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<sqlx::Error> for ScopeError {
    fn from(err: sqlx::Error) -> Self {
        ScopeError::Database(err.to_string())
    }
}

impl From<config::ConfigError> for ScopeError {
    fn from(err: config::ConfigError) -> Self {
        ScopeError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;
