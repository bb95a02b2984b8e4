use std::fmt;

/// Result type for histrace-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Shell name that has no history dialect
    UnknownDialect(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownDialect(name) => write!(f, "Shell {} is not supported", name),
        }
    }
}

impl std::error::Error for Error {}
