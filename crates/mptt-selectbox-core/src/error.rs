//! Error types for mptt-selectbox.

use std::path::PathBuf;

/// Result type alias for selector operations.
pub type Result<T> = std::result::Result<T, SelectError>;

/// Errors that can occur while operating selector caches and their controls.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// No control is bound under the given selector id.
    #[error("unknown selector '{id}'")]
    UnknownSelector { id: String },

    /// A control is bound but its cache was never initialized.
    #[error("selector '{id}' has not been initialized")]
    NotInitialized { id: String },

    /// Option markup could not be parsed.
    #[error("invalid option markup: {0}")]
    Markup(String),

    /// Configuration text could not be deserialized.
    #[error("invalid selector configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SelectError {
    /// Create an unknown-selector error.
    pub fn unknown_selector(id: impl Into<String>) -> Self {
        Self::UnknownSelector { id: id.into() }
    }

    /// Create a not-initialized error.
    pub fn not_initialized(id: impl Into<String>) -> Self {
        Self::NotInitialized { id: id.into() }
    }

    /// Create a markup error.
    pub fn markup(message: impl ToString) -> Self {
        Self::Markup(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl ToString) -> Self {
        Self::Config(message.to_string())
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the selector id this error refers to, if any.
    pub fn selector_id(&self) -> Option<&str> {
        match self {
            Self::UnknownSelector { id } | Self::NotInitialized { id } => Some(id),
            _ => None,
        }
    }
}
