use std::io;

use thiserror::Error;

/// Library-wide error type for dependency-updater operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration file is not a valid YAML mapping.
    #[error("Failed to parse config file {path}: {details}")]
    ConfigParse { path: String, details: String },

    /// Gerrit host is missing or not a URL.
    #[error("Invalid GERRIT_HOST: {0}")]
    InvalidHost(String),

    /// A required option was read but never configured.
    #[error("Config option '{0}' is not set. Add it to config.yaml or export it.")]
    MissingConfigKey(&'static str),

    /// Teams webhook request failed.
    #[error("Teams notification failed: {0}")]
    Notification(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn parse_error<P: Into<String>, D: ToString>(path: P, details: D) -> Self {
        AppError::ConfigParse { path: path.into(), details: details.to_string() }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit paths.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::ConfigParse { .. }
            | AppError::InvalidHost(_) => io::ErrorKind::InvalidInput,
            AppError::MissingConfigKey(_) => io::ErrorKind::NotFound,
            AppError::Notification(_) => io::ErrorKind::Other,
        }
    }
}
