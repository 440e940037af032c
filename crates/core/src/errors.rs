use std::path::PathBuf;

/// Result type alias for phplint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for phplint operations
///
/// Only fatal conditions live here. A syntax problem reported by the
/// interpreter is an ordinary lint outcome, never an `Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The version or syntax-modifier values of a variant could not be determined
    #[error("failed to resolve interpreter variant '{variant}': {message}")]
    VariantResolution { variant: String, message: String },

    /// A version string without a `<major>.<minor>` prefix
    #[error("cannot parse interpreter version '{version}'")]
    InvalidVersion { version: String },

    /// Spawn failures and unexpected exit codes
    #[error("{}", format_command_error(.command, .args, .message, .exit_code))]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },

    /// Cache backend failures
    #[error("cache {operation} failed: {message}")]
    Cache { operation: String, message: String },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Unsupported operation errors
    #[error("unsupported feature '{feature}': {message}")]
    Unsupported { feature: String, message: String },
}

fn format_command_error(
    command: &str,
    args: &[String],
    message: &str,
    exit_code: &Option<i32>,
) -> String {
    let args_str = args.join(" ");
    let command_line = if args_str.is_empty() {
        command.to_string()
    } else {
        format!("{command} {args_str}")
    };
    match exit_code {
        Some(code) => format!("command '{command_line}' failed with exit code {code}: {message}"),
        None => format!("command '{command_line}' failed: {message}"),
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

impl Error {
    /// Create a variant resolution error
    #[must_use]
    pub fn variant_resolution(variant: impl Into<String>, message: impl Into<String>) -> Self {
        Error::VariantResolution {
            variant: variant.into(),
            message: message.into(),
        }
    }

    /// Create an invalid version error
    #[must_use]
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Error::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
        }
    }

    /// Create a cache error
    #[must_use]
    pub fn cache(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Cache {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create an unsupported feature error
    #[must_use]
    pub fn unsupported(feature: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Unsupported {
            feature: feature.into(),
            message: message.into(),
        }
    }

    /// The exit code of a failed command, if the process got that far
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::CommandExecution { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}
