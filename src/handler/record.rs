use crate::data::Data;
use crate::level::Level;
use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use std::panic::Location;

/// An error attached to a record, captured at log time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Short type label, e.g. `io::Error` or `ConnectError`.
    pub type_name: String,
    pub msg: String,
    /// Messages from `source()`, outermost first.
    pub chain: Vec<String>,
}

impl ErrorInfo {
    /// Captures `error` and its `source()` chain.
    #[must_use]
    pub fn capture(error: &(dyn StdError + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        Self {
            type_name: short_type_name(error),
            msg: error.to_string(),
            chain,
        }
    }

    /// An error with no cause chain.
    #[must_use]
    pub fn new(type_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            msg: msg.into(),
            chain: Vec::new(),
        }
    }
}

/// The `Debug` of most error types starts with the type name; take that,
/// falling back to a generic label.
fn short_type_name(error: &dyn StdError) -> String {
    let debug = format!("{error:?}");
    let head: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if head.is_empty() || !head.starts_with(|c: char| c.is_ascii_uppercase()) {
        "Error".to_string()
    } else {
        head
    }
}

/// One log event as handlers see it.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub name: String,
    pub level: Level,
    /// Raw message, possibly with `{name}` placeholders and inline markup.
    pub msg: String,
    pub data: Data,
    pub created: DateTime<Utc>,
    pub file: String,
    pub line: u32,
    pub error: Option<ErrorInfo>,
}

impl LogRecord {
    /// A record stamped now, at the caller's location.
    #[must_use]
    #[track_caller]
    pub fn new(name: impl Into<String>, level: Level, msg: impl Into<String>, data: Data) -> Self {
        let location = Location::caller();
        Self {
            name: name.into(),
            level,
            msg: msg.into(),
            data,
            created: Utc::now(),
            file: location.file().to_string(),
            line: location.line(),
            error: None,
        }
    }

    /// Attaches error details, as `Logger::exception` does.
    #[must_use]
    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    /// The message with placeholders filled from the splat data, markup intact.
    #[must_use]
    pub fn message(&self) -> String {
        crate::fmt::interpolate(&self.msg, &self.data)
    }
}
