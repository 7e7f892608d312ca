//! The logging context: logger levels, the root handler list, named
//! handlers, verbosity and the console theme for one process (or one test).
//!
//! Configuration calls are serialized by a single mutex. Log calls never take
//! it: they read the handler list under a read lock and the verbosity from an
//! atomic.

use crate::Error;
use crate::fmt::Theme;
use crate::handler::{
    CastContext, HandlerRef, HandlerValue, LogRecord, NamedHandlerCast, NamedHandlers, OnConflict,
};
use crate::internal;
use crate::level::Level;
use crate::logger::{Logger, LoggerTree};
use crate::setup::Setup;
use crate::verbosity::{
    MAX_VERBOSITY, Verbosity, VerbosityLevels, VerbosityState, check_verbosity,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};

static GLOBAL: OnceLock<Arc<Logging>> = OnceLock::new();

#[derive(Debug)]
struct Registry {
    handlers: NamedHandlers,
    verbosity: VerbosityState,
}

/// Shared state behind every [`Logger`] created from it.
#[derive(Debug)]
pub struct Logging {
    tree: LoggerTree,
    /// Mirrors the registry's verbosity for lock-free reads; `MAX_VERBOSITY` is unset.
    verbosity: AtomicUsize,
    registry: Mutex<Registry>,
    theme: RwLock<Theme>,
}

impl Logging {
    /// A fresh context with `console` and `export` registered and nothing attached.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tree: LoggerTree::new(),
            verbosity: AtomicUsize::new(MAX_VERBOSITY),
            registry: Mutex::new(Registry {
                handlers: NamedHandlers::with_builtins(),
                verbosity: VerbosityState::new(),
            }),
            theme: RwLock::new(Theme::default()),
        })
    }

    /// The process-wide context, created on first use.
    #[must_use]
    pub fn global() -> Arc<Self> {
        GLOBAL.get_or_init(Self::new).clone()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A handle for logger `name`; `::` separators are accepted.
    #[must_use]
    pub fn get_logger(self: &Arc<Self>, name: &str) -> Logger {
        Logger::new(name, Arc::clone(self))
    }

    /// Logger levels and the root handler list.
    #[must_use]
    pub const fn tree(&self) -> &LoggerTree {
        &self.tree
    }

    // Levels

    /// Sets the level of logger `name`. Serialized with verbosity changes.
    pub fn set_level(&self, name: &str, level: Level) {
        let _registry = self.registry();
        self.tree.set_level(name, level);
    }

    /// The level set on `name` itself, `NotSet` if it inherits.
    #[must_use]
    pub fn get_level(&self, name: &str) -> Level {
        self.tree.level(name)
    }

    // Theme

    /// Replaces the theme handed to named handler casts from now on. Handlers
    /// already attached keep the theme they were built with.
    pub fn set_theme(&self, theme: Theme) {
        *self.theme.write().unwrap_or_else(PoisonError::into_inner) = theme;
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // Named handlers

    /// # Errors
    /// See [`NamedHandlers::register`].
    pub fn register_named_handler(
        &self,
        name: &str,
        cast: NamedHandlerCast,
        on_conflict: OnConflict,
    ) -> Result<(), Error> {
        self.registry().handlers.register(name, cast, on_conflict)
    }

    /// # Errors
    /// `UnknownHandler` if `name` was never registered.
    pub fn get_named_handler_cast(&self, name: &str) -> Result<NamedHandlerCast, Error> {
        self.registry().handlers.cast(name)
    }

    /// Casts `value` with the cast registered under `name` and swaps the result
    /// in for the current handler.
    ///
    /// The cast runs outside the lock, so it may open files or build handlers
    /// without blocking other configuration calls.
    ///
    /// # Errors
    /// `UnknownHandler`, or the cast's error. Nothing changes on error.
    pub fn set_named_handler(&self, name: &str, value: impl Into<HandlerValue>) -> Result<(), Error> {
        let cast = self.get_named_handler_cast(name)?;
        let theme = self.theme();
        let handler = cast.call(value.into(), &CastContext { theme: &theme })?;
        internal::debug(
            "named",
            &format!(
                "set '{name}' to {}",
                if handler.is_some() { "a handler" } else { "none" }
            ),
        );
        self.registry().handlers.install(name, handler, &self.tree)
    }

    /// # Errors
    /// `UnknownHandler` if `name` was never registered.
    pub fn get_named_handler(&self, name: &str) -> Result<Option<HandlerRef>, Error> {
        self.registry().handlers.get(name)
    }

    /// # Errors
    /// `UnknownHandler` if `name` was never registered.
    pub fn del_named_handler(&self, name: &str) -> Result<(), Error> {
        self.registry().handlers.delete(name, &self.tree)
    }

    // Verbosity

    /// Binds `levels` to logger `name`; applied at once when a verbosity is set.
    pub fn set_verbosity_levels(&self, name: &str, levels: VerbosityLevels) {
        let mut registry = self.registry();
        if let Some((name, level)) = registry.verbosity.set_levels(name, levels) {
            self.tree.set_level(&name, level);
        }
    }

    /// The table bound to `name`, if any.
    #[must_use]
    pub fn get_verbosity_levels(&self, name: &str) -> Option<VerbosityLevels> {
        self.registry().verbosity.levels(name).cloned()
    }

    /// Unbinds `name`; the logger keeps its current level.
    pub fn del_verbosity_levels(&self, name: &str) -> Option<VerbosityLevels> {
        self.registry().verbosity.del_levels(name)
    }

    /// Sets the verbosity and re-applies every bound table.
    ///
    /// # Errors
    /// `Validation` for `usize::MAX`, which is reserved.
    pub fn set_verbosity(&self, verbosity: Verbosity) -> Result<(), Error> {
        let verbosity = check_verbosity(verbosity)?;
        let mut registry = self.registry();
        for (name, level) in registry.verbosity.set_verbosity(verbosity)? {
            self.tree.set_level(&name, level);
        }
        self.verbosity.store(verbosity, Ordering::Release);
        internal::debug("verbosity", &format!("set to {verbosity}"));
        Ok(())
    }

    /// The current verbosity; `None` until one is set.
    #[must_use]
    pub fn get_verbosity(&self) -> Option<Verbosity> {
        let raw = self.verbosity.load(Ordering::Acquire);
        (raw != MAX_VERBOSITY).then_some(raw)
    }

    /// Clears the verbosity; logger levels stay as last resolved.
    pub fn del_verbosity(&self) -> Option<Verbosity> {
        let mut registry = self.registry();
        self.verbosity.store(MAX_VERBOSITY, Ordering::Release);
        registry.verbosity.del_verbosity()
    }

    // Setup and emission

    /// Applies `setup` to this context.
    ///
    /// # Errors
    /// The first failing step; earlier steps stay applied.
    pub fn setup(&self, setup: Setup) -> Result<(), Error> {
        setup.apply(self)
    }

    /// Sends `record` to every attached handler that accepts it. Handler
    /// errors are reported on stderr and otherwise ignored.
    pub fn dispatch(&self, record: &LogRecord) {
        let verbosity = self.get_verbosity();
        for handler in self.tree.handlers() {
            if !handler.handles(record, verbosity) {
                continue;
            }
            if let Err(e) = handler.emit(record) {
                internal::error(
                    "emit",
                    &format!("handler failed on record from '{}': {e}", record.name),
                );
            }
        }
    }

    /// Flushes every attached handler, reporting failures on stderr.
    pub fn flush(&self) {
        for handler in self.tree.handlers() {
            if let Err(e) = handler.flush() {
                internal::error("flush", &e.to_string());
            }
        }
    }
}
