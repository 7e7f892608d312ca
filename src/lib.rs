//! `splatlog` - logging with attached key/value data.
//!
//! Every log call takes a message and a splat of data. Records go to named
//! handlers: `console` renders an aligned, colored grid with a typed data
//! table, `export` writes one JSON object per record. A verbosity dial maps
//! `-v` counts to per-logger levels.
//!
//! # Example
//!
//! ```
//! use splatlog::{Level, Logging, Setup, VerbosityLevels, splat};
//!
//! let logging = Logging::new();
//! logging
//!     .setup(
//!         Setup::new()
//!             .verbosity_levels(
//!                 "myapp",
//!                 VerbosityLevels::new([(0, Level::Warning), (1, Level::Info), (2, Level::Debug)])
//!                     .unwrap(),
//!             )
//!             .verbosity(1)
//!             .console(false),
//!     )
//!     .unwrap();
//!
//! let log = logging.get_logger("myapp");
//! assert!(log.is_enabled_for(Level::Info));
//! log.info("connected to {host}", splat! { host = "example.com", port = 5432 });
//! ```
//!
//! # Features
//!
//! - `cli` (default): clap `VerbosityArgs` and the `splatlog` binary

// Core modules (always available)
pub mod config;
pub mod data;
mod error;
pub mod fmt;
pub mod handler;
pub mod internal;
pub mod level;
pub mod logger;
pub mod logging;
pub mod names;
pub mod setup;
pub mod verbosity;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use config::Config;
pub use data::{Data, RichText, Value};
pub use error::{Error, Result};
pub use fmt::{Highlight, Style, Theme};
pub use handler::{
    ConsoleHandler, ExportHandler, Handler, HandlerRef, HandlerValue, LogRecord, OnConflict,
    SharedBuffer, Stream,
};
pub use level::Level;
pub use logger::Logger;
pub use logging::Logging;
pub use setup::{LevelSetting, Setup};
pub use verbosity::{Verbosity, VerbosityLevels};

#[cfg(feature = "cli")]
pub use cli::VerbosityArgs;

// Shortcuts onto the process-wide context

/// Logger `name` in the global context.
#[must_use]
pub fn get_logger(name: &str) -> Logger {
    Logging::global().get_logger(name)
}

/// Configures the global context.
///
/// # Errors
/// See [`Setup::apply`].
pub fn setup(setup: Setup) -> Result<()> {
    Logging::global().setup(setup)
}

/// # Errors
/// `Validation` for the reserved `usize::MAX`.
pub fn set_verbosity(verbosity: Verbosity) -> Result<()> {
    Logging::global().set_verbosity(verbosity)
}

/// Verbosity of the global context.
#[must_use]
pub fn get_verbosity() -> Option<Verbosity> {
    Logging::global().get_verbosity()
}

/// Sets a named handler on the global context.
///
/// # Errors
/// See [`Logging::set_named_handler`].
pub fn set_named_handler(name: &str, value: impl Into<HandlerValue>) -> Result<()> {
    Logging::global().set_named_handler(name, value)
}
