//! Application error types with rich context

use thiserror::Error;

use crate::types::Operation;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Process setup failed (signal listeners, panic reporting)
    #[error("Startup error: {message}")]
    Startup { message: String },

    // ─────────────────────────────────────────────────────────────
    // Data Source Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to load {operation}: {message}")]
    DataFetch {
        operation: Operation,
        message: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Navigation Errors
    // ─────────────────────────────────────────────────────────────
    #[error("No tab at index {index}")]
    InvalidTab { index: usize },

    #[error("Invalid command: {message}")]
    InvalidCommand { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn startup(message: impl Into<String>) -> Self {
        Self::Startup {
            message: message.into(),
        }
    }

    pub fn data_fetch(operation: Operation, message: impl Into<String>) -> Self {
        Self::DataFetch {
            operation,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::DataFetch { .. } | Error::InvalidTab { .. } | Error::InvalidCommand { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Startup { .. } | Error::ConfigInvalid { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }
}
