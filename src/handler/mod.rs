//! Handlers receive records that passed the logger's level check and write
//! them somewhere. The `Handler` trait lets users add destinations without
//! touching splatlog itself; `console` and `export` are the built-in ones.

mod cast;
mod console;
mod export;
mod named;
mod record;
mod stream;

pub use cast::{CastContext, HandlerValue, to_console_handler, to_export_handler};
pub use console::{ConsoleConfig, ConsoleHandler};
pub use export::{
    EncoderStyle, ExportConfig, ExportHandler, JsonFormatter, JsonFormatterConfig, Timezone,
};
pub use named::{NamedHandlerCast, NamedHandlers, OnConflict};
pub use record::{ErrorInfo, LogRecord};
pub use stream::{FileMode, SharedBuffer, Stream};

use crate::level::Level;
use crate::verbosity::{Verbosity, VerbosityLevelsFilter};
use std::sync::Arc;

/// `Send + Sync` so one handler instance can serve every thread.
pub trait Handler: Send + Sync {
    /// Records below this level are skipped. `NotSet` lets everything through.
    fn level(&self) -> Level {
        Level::NotSet
    }

    /// Per-logger thresholds tied to the current verbosity.
    fn verbosity_levels(&self) -> Option<&VerbosityLevelsFilter> {
        None
    }

    /// Whether `record` should reach [`emit`](Self::emit) at `verbosity`.
    fn handles(&self, record: &LogRecord, verbosity: Option<Verbosity>) -> bool {
        record.level >= self.level()
            && self
                .verbosity_levels()
                .is_none_or(|filter| filter.allows(&record.name, record.level, verbosity))
    }

    /// Renders and writes one record.
    ///
    /// # Errors
    /// I/O or serialization failures from the destination.
    fn emit(&self, record: &LogRecord) -> Result<(), crate::Error>;

    /// # Errors
    /// I/O errors from the destination.
    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}

/// Shared handle; identity (`Arc::ptr_eq`) is what "the same handler" means.
pub type HandlerRef = Arc<dyn Handler>;

/// Pointer identity for handler handles.
#[must_use]
pub fn same_handler(a: &HandlerRef, b: &HandlerRef) -> bool {
    Arc::ptr_eq(a, b)
}
