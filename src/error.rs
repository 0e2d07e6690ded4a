//! Error types for catalog construction, tab selection and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// A snippet catalog could not be built.
///
/// Raised at construction time only; a catalog that exists is always valid.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("snippet catalog is empty")]
    Empty,

    #[error("duplicate snippet key '{0}'")]
    DuplicateKey(String),

    #[error("snippet #{0} has an empty key")]
    EmptyKey(usize),

    #[error("default tab '{0}' is not in the catalog")]
    UnknownDefault(String),

    #[error("failed to parse snippet file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read snippet file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A tab selection referenced something the catalog does not contain.
///
/// Never fatal: callers either surface it or keep the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no snippet with key '{0}'")]
    UnknownKey(String),

    #[error("tab index {index} out of range (catalog has {len} tabs)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("invalid color for {field}: {value}")]
    InvalidColor { field: &'static str, value: String },
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Figment(Box::new(e))
    }
}

/// File logging could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("a global logger is already installed: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
