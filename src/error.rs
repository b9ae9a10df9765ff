//! Error types for SqlQuest.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for SqlQuest operations.
///
/// The pipeline treats these categories very differently: `Judge` and
/// `Execution` errors fail the whole request, while `Progress` errors are
/// absorbed and only logged.
#[derive(Error, Debug)]
pub enum QuestError {
    /// Judge service errors (unreachable, malformed response, timeout).
    #[error("Judge error: {0}")]
    Judge(String),

    /// Query execution transport errors (backend unreachable, timed out).
    #[error("Execution error: {0}")]
    Execution(String),

    /// Progress persistence errors (lookup/update/insert failures).
    #[error("Progress error: {0}")]
    Progress(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuestError {
    /// Creates a judge error with the given message.
    pub fn judge(msg: impl Into<String>) -> Self {
        Self::Judge(msg.into())
    }

    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a progress error with the given message.
    pub fn progress(msg: impl Into<String>) -> Self {
        Self::Progress(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Judge(_) => "Judge Error",
            Self::Execution(_) => "Execution Error",
            Self::Progress(_) => "Progress Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using QuestError.
pub type Result<T> = std::result::Result<T, QuestError>;
