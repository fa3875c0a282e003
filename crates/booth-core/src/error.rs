//! Unified error handling for booth billing
//!
//! A booth refusing a call because it is busy is not an error; see
//! `CallOutcome` in the models module.

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // ==================== Validation Errors ====================
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    // ==================== Resource Errors ====================
    #[error("Booth not found: {0}")]
    BoothNotFound(u32),

    // ==================== Internal Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    /// Shorthand for building an `InvalidArgument` error
    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidArgument(message.into())
    }

    /// Returns a stable error code for display and logging
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "invalid_argument",
            AppError::Overflow(_) => "overflow",
            AppError::BoothNotFound(_) => "booth_not_found",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::Io(_) => "io_error",
        }
    }

    /// True for errors caused by the caller's input rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidArgument(_) | AppError::Overflow(_) | AppError::BoothNotFound(_)
        )
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
