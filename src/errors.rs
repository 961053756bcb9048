//! Logger Tree Error Hierarchy
//!
//! Structural errors (bad arguments, capacity overflow, configuration) are returned
//! synchronously to the caller. Handler runtime failures never reach the log call site:
//! they are isolated at the publish boundary and handed to an
//! [`ErrorReporter`](crate::ErrorReporter).

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input, e.g. an unknown level name
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A node already holds the maximum number of distinct attachment keys
    #[error("Maximum number of attachments exceeded (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// Configuration loading or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure returned by a [`Handler`](crate::Handler) while publishing a record.
///
/// These are recoverable: the publish pipeline reports them and moves on to the next handler.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Handler publication failed: {0}")]
    PublishFailure(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Category passed to the error reporter, mirroring the classic error manager codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Generic,
    WriteFailure,
    FlushFailure,
    CloseFailure,
    OpenFailure,
    FormatFailure,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Generic => "generic",
            ErrorCategory::WriteFailure => "write_failure",
            ErrorCategory::FlushFailure => "flush_failure",
            ErrorCategory::CloseFailure => "close_failure",
            ErrorCategory::OpenFailure => "open_failure",
            ErrorCategory::FormatFailure => "format_failure",
        }
    }
}
