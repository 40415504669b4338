//! Error types for the pulse library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all pulse operations.
#[derive(Error, Debug)]
pub enum PulseError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Project key not present in the issue source
    #[error("Project '{key}' not found")]
    ProjectNotFound { key: String },
    /// Issue is not currently flagged for the requested action
    #[error("Issue '{key}' is not flagged for {action}")]
    IssueNotFlagged { key: String, action: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// A notification channel is missing a required setting
    #[error("{channel} channel is not configured: set '{setting}' first")]
    NotConfigured {
        channel: &'static str,
        setting: &'static str,
    },
    /// A notification channel rejected or failed the send; the message is
    /// the collaborator's own
    #[error("{message}")]
    Delivery { message: String },
    /// Issue source could not deliver data
    #[error("Issue source error: {message}")]
    Source { message: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PulseError {
        PulseError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PulseError {
        PulseError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PulseError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an issue source error from any displayable cause.
    pub fn source(message: impl Into<String>) -> Self {
        PulseError::Source {
            message: message.into(),
        }
    }

    /// Creates a delivery error carrying the channel's message verbatim.
    pub fn delivery(message: impl Into<String>) -> Self {
        PulseError::Delivery {
            message: message.into(),
        }
    }

    /// True when the error is a missing-configuration error the user can fix
    /// through `settings set`.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, PulseError::NotConfigured { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PulseError::database(message).with_source(e))
    }
}

/// Result type alias for pulse operations
pub type Result<T> = std::result::Result<T, PulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_message_names_setting() {
        let err = PulseError::NotConfigured {
            channel: "Chat",
            setting: "chat_webhook_url",
        };
        assert!(err.is_not_configured());
        assert_eq!(
            err.to_string(),
            "Chat channel is not configured: set 'chat_webhook_url' first"
        );
    }

    #[test]
    fn test_db_context_wraps_rusqlite_error() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to read setting").unwrap_err();
        assert!(matches!(err, PulseError::Database { .. }));
        assert!(err.to_string().contains("Failed to read setting"));
    }
}
