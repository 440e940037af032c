//! Error types of the cache backends

use std::path::PathBuf;

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Backend failures. All of them are fatal to a lint run.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// I/O errors during cache operations
    #[error("cache I/O error during {operation} on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// An entry could not be encoded or decoded
    #[error("cache serialization error for key '{key}': {message}")]
    Serialization { key: String, message: String },

    /// The configured engine cannot be built
    #[error("cache engine '{engine}' is not supported")]
    UnsupportedEngine { engine: String },

    /// Failures raised by shared helpers such as atomic writes
    #[error(transparent)]
    Core(#[from] phplint_core::Error),
}

impl CacheError {
    /// Create an I/O error
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(key: impl Into<String>, message: impl ToString) -> Self {
        CacheError::Serialization {
            key: key.into(),
            message: message.to_string(),
        }
    }

    fn operation(&self) -> &'static str {
        match self {
            CacheError::Io { operation, .. } => *operation,
            CacheError::Serialization { .. } => "serialization",
            CacheError::UnsupportedEngine { .. } => "setup",
            CacheError::Core(_) => "write",
        }
    }
}

impl From<CacheError> for phplint_core::Error {
    fn from(error: CacheError) -> Self {
        match error {
            CacheError::UnsupportedEngine { engine } => phplint_core::Error::unsupported(
                format!("cache engine '{engine}'"),
                "only the memory and file engines are available",
            ),
            CacheError::Core(inner) => phplint_core::Error::cache("write", inner.to_string()),
            other => phplint_core::Error::cache(other.operation(), other.to_string()),
        }
    }
}
