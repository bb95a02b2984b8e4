use std::fmt;

/// Result type for histrace-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while preparing the environment
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Invalid configuration value or unreadable config file
    Config(String),

    /// A value required before parsing (shell, history file) is missing
    NotReady(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::NotReady(msg) => write!(f, "Environment is not prepared: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::NotReady(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<histrace_types::Error> for Error {
    fn from(err: histrace_types::Error) -> Self {
        Error::Config(err.to_string())
    }
}
