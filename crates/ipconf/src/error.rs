//! Error types for configuration engine operations.

use std::io;

/// Result type for configuration engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the platform or reading
/// resolver state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error, e.g. while reading a resolver file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The platform reported a failure.
    #[error("platform error: {message}")]
    Platform {
        /// Human-readable error message.
        message: String,
    },

    /// Platform failure with operation context.
    #[error("{operation}: {message}")]
    PlatformWithContext {
        /// The operation that failed.
        operation: String,
        /// Human-readable error message.
        message: String,
    },

    /// Link not known to the platform.
    #[error("link not found: ifindex {ifindex}")]
    LinkNotFound {
        /// The interface index that was not found.
        ifindex: u32,
    },
}

impl Error {
    /// Create a platform error from a message.
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform {
            message: message.into(),
        }
    }

    /// Add context to this error.
    ///
    /// Wraps platform errors with operation context. Other errors are returned unchanged.
    pub fn with_context(self, operation: impl Into<String>) -> Self {
        match self {
            Self::Platform { message } => Self::PlatformWithContext {
                operation: operation.into(),
                message,
            },
            other => other,
        }
    }

    /// Check if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::LinkNotFound { .. } => true,
            Self::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
