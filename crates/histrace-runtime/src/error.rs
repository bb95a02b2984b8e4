use std::fmt;

/// Result type for histrace-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while running commands and managing stored data
#[derive(Debug)]
pub enum Error {
    /// History layer error
    History(histrace_history::Error),

    /// Environment error
    Core(histrace_core::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Trace, bookmark or entry does not exist
    NotFound(String),

    /// The command could not be started at all
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// Rejected argument (bookmark name, GC parameter, empty command)
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::History(err) => write!(f, "{}", err),
            Error::Core(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::Spawn { command, source } => {
                write!(f, "Cannot execute {}: {}", command, source)
            }
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::History(err) => Some(err),
            Error::Core(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Spawn { source, .. } => Some(source),
            Error::NotFound(_) | Error::InvalidInput(_) => None,
        }
    }
}

impl From<histrace_history::Error> for Error {
    fn from(err: histrace_history::Error) -> Self {
        match err {
            histrace_history::Error::NotFound(msg) => Error::NotFound(msg),
            other => Error::History(other),
        }
    }
}

impl From<histrace_core::Error> for Error {
    fn from(err: histrace_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
