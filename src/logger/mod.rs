//! Named logging handles.
//!
//! A `Logger` is just a name plus the context it logs into, so it is cheap to
//! clone and store. Each call checks the name's effective level, builds a
//! record and hands it to the context for dispatch.

mod tree;

pub use tree::{LoggerTree, ROOT_DEFAULT_LEVEL};

use crate::data::Data;
use crate::handler::{ErrorInfo, LogRecord};
use crate::level::Level;
use crate::logging::Logging;
use crate::names;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    logging: Arc<Logging>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// `name` is normalized: `""` becomes `root`, `a::b` becomes `a.b`.
    #[must_use]
    pub fn new(name: &str, logging: Arc<Logging>) -> Self {
        Self {
            name: names::normalize(name).into(),
            logging,
        }
    }

    /// Dotted name, `root` for the root logger.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn logging(&self) -> &Arc<Logging> {
        &self.logging
    }

    /// Logger for `{name}.{suffix}`.
    #[must_use]
    pub fn child(&self, suffix: &str) -> Self {
        let name = if names::is_root(&self.name) {
            suffix.to_string()
        } else {
            format!("{}.{suffix}", self.name)
        };
        Self::new(&name, Arc::clone(&self.logging))
    }

    /// Sets this logger's own level; `NotSet` makes it inherit again.
    pub fn set_level(&self, level: Level) {
        self.logging.set_level(&self.name, level);
    }

    /// Level set on this name; `NotSet` when inherited.
    #[must_use]
    pub fn level(&self) -> Level {
        self.logging.tree().level(&self.name)
    }

    /// The level that actually gates this logger's records.
    #[must_use]
    pub fn effective_level(&self) -> Level {
        self.logging.tree().effective_level(&self.name)
    }

    /// Whether a record at `level` would reach the handlers.
    #[must_use]
    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.effective_level()
    }

    /// Emits a record at `level`. Never fails; handler errors go to stderr.
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, data: impl Into<Data>) {
        if !self.is_enabled_for(level) {
            return;
        }
        let record = LogRecord::new(&*self.name, level, msg, data.into());
        self.logging.dispatch(&record);
    }

    /// Logs at [`Level::Debug`].
    #[track_caller]
    pub fn debug(&self, msg: &str, data: impl Into<Data>) {
        self.log(Level::Debug, msg, data);
    }

    /// Logs at [`Level::Info`].
    #[track_caller]
    pub fn info(&self, msg: &str, data: impl Into<Data>) {
        self.log(Level::Info, msg, data);
    }

    /// Logs at [`Level::Warning`].
    #[track_caller]
    pub fn warning(&self, msg: &str, data: impl Into<Data>) {
        self.log(Level::Warning, msg, data);
    }

    /// Logs at [`Level::Error`].
    #[track_caller]
    pub fn error(&self, msg: &str, data: impl Into<Data>) {
        self.log(Level::Error, msg, data);
    }

    /// Logs at [`Level::Critical`].
    #[track_caller]
    pub fn critical(&self, msg: &str, data: impl Into<Data>) {
        self.log(Level::Critical, msg, data);
    }

    /// Logs at `ERROR` with `error` and its source chain attached.
    #[track_caller]
    pub fn exception(&self, msg: &str, error: &(dyn StdError + 'static), data: impl Into<Data>) {
        if !self.is_enabled_for(Level::Error) {
            return;
        }
        let record = LogRecord::new(&*self.name, Level::Error, msg, data.into())
            .with_error(ErrorInfo::capture(error));
        self.logging.dispatch(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{SharedBuffer, Stream};
    use crate::splat;

    fn setup() -> (Arc<Logging>, SharedBuffer) {
        let logging = Logging::new();
        let buffer = SharedBuffer::new();
        logging
            .set_named_handler("export", Stream::from(buffer.clone()))
            .unwrap();
        (logging, buffer)
    }

    #[test]
    fn below_effective_level_is_dropped() {
        let (logging, buffer) = setup();
        let log = logging.get_logger("app");
        log.info("hidden", ());
        assert!(buffer.contents().is_empty());

        log.set_level(Level::Debug);
        log.child("net").debug("shown {n}", splat! { n = 1 });
        let out = buffer.contents();
        assert!(out.contains("\"name\":\"app.net\""));
        assert!(out.contains("\"msg\":\"shown 1\""));
    }

    #[test]
    fn exception_attaches_error() {
        let (logging, buffer) = setup();
        let err = std::io::Error::other("boom");
        logging.get_logger("app").exception("failed", &err, ());
        let out = buffer.contents();
        assert!(out.contains("\"level\":\"ERROR\""));
        assert!(out.contains("\"msg\":\"boom\""));
    }

    #[test]
    fn records_point_at_the_call_site() {
        let (logging, buffer) = setup();
        logging.get_logger("app").error("here", ());
        assert!(buffer.contents().contains("logger/mod.rs"));
    }
}
