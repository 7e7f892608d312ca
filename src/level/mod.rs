//! Severity levels that gate which records reach which handlers.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so loggers and handlers can compare a record's level against their threshold.
///
/// Numeric values follow the conventional 0/10/.../50 scale so levels can be
/// given as numbers in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// No threshold of its own: a logger at `NotSet` defers to its parent.
    #[default]
    NotSet = 0,
    /// Detail useful while diagnosing problems.
    Debug = 10,
    /// Normal operational milestones.
    Info = 20,
    /// Anomalies that may need attention.
    Warning = 30,
    /// Failures of an operation.
    Error = 40,
    /// Failures of the program as a whole.
    Critical = 50,
}

/// Default threshold for applications, the things you actually run.
pub const DEFAULT_APP_LEVEL: Level = Level::Info;

/// Default threshold for libraries, the things applications use.
pub const DEFAULT_LIB_LEVEL: Level = Level::Warning;

impl Level {
    /// Uppercase, matching what console and export output print.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSet => "NOTSET",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Numeric value: 0, 10, 20, 30, 40 or 50.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Only the six known values map to a level; anything else is `None`.
    #[must_use]
    pub const fn from_value(value: u64) -> Option<Self> {
        match value {
            0 => Some(Self::NotSet),
            10 => Some(Self::Debug),
            20 => Some(Self::Info),
            30 => Some(Self::Warning),
            40 => Some(Self::Error),
            50 => Some(Self::Critical),
            _ => None,
        }
    }

    /// All levels, least severe first.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::NotSet,
            Self::Debug,
            Self::Info,
            Self::Warning,
            Self::Error,
            Self::Critical,
        ]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown log level: '{}'; known levels are NOTSET (0), DEBUG (10), INFO (20), \
             WARNING (30), ERROR (40) and CRITICAL (50), case-insensitive",
            self.0
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl From<ParseLevelError> for crate::Error {
    fn from(e: ParseLevelError) -> Self {
        Self::InvalidLevel(e.0)
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts names (case-insensitive, with common aliases) and numeric strings like `"10"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed
                .parse::<u64>()
                .ok()
                .and_then(Self::from_value)
                .ok_or_else(|| ParseLevelError(s.to_string()));
        }

        match trimmed.to_lowercase().as_str() {
            "notset" => Ok(Self::NotSet),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            "critical" | "fatal" => Ok(Self::Critical),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelVisitor;

        impl Visitor<'_> for LevelVisitor {
            type Value = Level;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a log level name or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Level, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Level, E> {
                Level::from_value(v).ok_or_else(|| E::custom(ParseLevelError(v.to_string())))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Level, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(Level::from_value)
                    .ok_or_else(|| E::custom(ParseLevelError(v.to_string())))
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_parse() {
        assert_eq!("10".parse::<Level>().unwrap(), Level::Debug);
        assert!("8".parse::<Level>().is_err());
    }

    #[test]
    fn deserializes_names_and_numbers() {
        let levels: Vec<Level> = serde_json::from_str(r#"["debug", 30, "FATAL"]"#).unwrap();
        assert_eq!(levels, vec![Level::Debug, Level::Warning, Level::Critical]);
        assert!(serde_json::from_str::<Level>("-1").is_err());
    }
}
