use std::fmt;

/// Result type for histrace-history operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading history
#[derive(Debug)]
pub enum Error {
    /// Reading the history file failed
    Io(std::io::Error),

    /// Environment could not be prepared or is incomplete
    Core(histrace_core::Error),

    /// Requested entry does not exist
    NotFound(String),

    /// Filter pattern did not compile
    Pattern(regex::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "Cannot read history: {}", err),
            Error::Core(err) => write!(f, "{}", err),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::Pattern(err) => write!(f, "Invalid filter pattern: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Core(err) => Some(err),
            Error::Pattern(err) => Some(err),
            Error::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<histrace_core::Error> for Error {
    fn from(err: histrace_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err)
    }
}
