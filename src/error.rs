//! Unified error type for all splatlog configuration operations.
//!
//! Log emission never returns these: only setup, registry, verbosity and
//! config calls do, and they fail fast.

/// Error type for splatlog operations.
#[derive(Debug)]
pub enum Error {
    /// Malformed verbosity, verbosity levels, handler name or other input.
    Validation(String),
    /// Operation on a named handler that was never registered.
    UnknownHandler(String),
    /// Conflicting re-registration of a named handler cast.
    DuplicateName(String),
    /// A cast function rejected its input value.
    Cast {
        /// What the cast accepts.
        expected: String,
        /// What it was given.
        given: String,
    },
    /// Unknown log level name or number.
    InvalidLevel(String),
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Format/serialization error.
    Format(String),
}

/// Shorthand used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn cast(expected: impl Into<String>, given: impl Into<String>) -> Self {
        Self::Cast {
            expected: expected.into(),
            given: given.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::UnknownHandler(name) => write!(f, "no named handler registered as '{name}'"),
            Self::DuplicateName(name) => {
                write!(f, "a different handler cast is already registered as '{name}'")
            }
            Self::Cast { expected, given } => write!(f, "expected {expected}, given {given}"),
            Self::InvalidLevel(level) => write!(f, "unknown log level: '{level}'"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::Format(s) => write!(f, "format error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}
