//! Named handlers: stable names (`console`, `export`, custom ones) bound to a
//! cast function and, once set, to a live handler on the root handler list.
//!
//! A name moves from unregistered to registered-detached on `register`, and
//! between detached and attached on `set`. Nothing unregisters a name.

use super::cast::{self, CastContext, HandlerValue};
use super::{HandlerRef, same_handler};
use crate::Error;
use crate::logger::LoggerTree;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

type CastFn =
    dyn Fn(HandlerValue, &CastContext<'_>) -> Result<Option<HandlerRef>, Error> + Send + Sync;

/// A shared cast function. Two casts are the same when they share the allocation.
#[derive(Clone)]
pub struct NamedHandlerCast(Arc<CastFn>);

static CONSOLE_CAST: LazyLock<NamedHandlerCast> =
    LazyLock::new(|| NamedHandlerCast::new(cast::to_console_handler));

static EXPORT_CAST: LazyLock<NamedHandlerCast> =
    LazyLock::new(|| NamedHandlerCast::new(cast::to_export_handler));

impl NamedHandlerCast {
    /// Wraps `cast`. Each call makes a distinct cast, even for the same function.
    pub fn new<F>(cast: F) -> Self
    where
        F: Fn(HandlerValue, &CastContext<'_>) -> Result<Option<HandlerRef>, Error>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(cast))
    }

    /// The built-in `console` cast.
    #[must_use]
    pub fn console() -> Self {
        CONSOLE_CAST.clone()
    }

    /// The built-in `export` cast.
    #[must_use]
    pub fn export() -> Self {
        EXPORT_CAST.clone()
    }

    /// # Errors
    /// Whatever the cast function returns.
    pub fn call(
        &self,
        value: HandlerValue,
        ctx: &CastContext<'_>,
    ) -> Result<Option<HandlerRef>, Error> {
        (self.0)(value, ctx)
    }
}

impl PartialEq for NamedHandlerCast {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NamedHandlerCast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamedHandlerCast({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

/// What `register` does when the name is taken by a different cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnConflict {
    #[default]
    Raise,
    Ignore,
    Replace,
}

struct Entry {
    cast: NamedHandlerCast,
    current: Option<HandlerRef>,
}

/// The registry. Not synchronized itself; the logging context keeps it
/// behind its mutex.
#[derive(Default)]
pub struct NamedHandlers {
    entries: BTreeMap<String, Entry>,
}

impl fmt::Debug for NamedHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(name, entry)| (name, entry.current.is_some())),
            )
            .finish()
    }
}

fn check_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::validation("named handler names can not be empty"));
    }
    Ok(())
}

impl NamedHandlers {
    /// No names at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `console` and `export` registered, nothing attached.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut handlers = Self::new();
        for (name, cast) in [
            ("console", NamedHandlerCast::console()),
            ("export", NamedHandlerCast::export()),
        ] {
            handlers.entries.insert(
                name.to_string(),
                Entry {
                    cast,
                    current: None,
                },
            );
        }
        handlers
    }

    /// Binds `cast` to `name`.
    ///
    /// Registering the identical cast again is a no-op regardless of
    /// `on_conflict`. `Replace` keeps any attached handler; only later sets
    /// use the new cast.
    ///
    /// # Errors
    /// `Validation` for an empty name; `DuplicateName` when a different cast
    /// holds the name and `on_conflict` is `Raise`.
    pub fn register(
        &mut self,
        name: &str,
        cast: NamedHandlerCast,
        on_conflict: OnConflict,
    ) -> Result<(), Error> {
        check_name(name)?;
        match self.entries.get_mut(name) {
            None => {
                self.entries.insert(
                    name.to_string(),
                    Entry {
                        cast,
                        current: None,
                    },
                );
            }
            Some(entry) if entry.cast == cast => {}
            Some(entry) => match on_conflict {
                OnConflict::Raise => return Err(Error::DuplicateName(name.to_string())),
                OnConflict::Ignore => {}
                OnConflict::Replace => entry.cast = cast,
            },
        }
        Ok(())
    }

    fn entry(&self, name: &str) -> Result<&Entry, Error> {
        check_name(name)?;
        self.entries
            .get(name)
            .ok_or_else(|| Error::UnknownHandler(name.to_string()))
    }

    /// The cast registered under `name`.
    ///
    /// # Errors
    /// `UnknownHandler` if `name` was never registered.
    pub fn cast(&self, name: &str) -> Result<NamedHandlerCast, Error> {
        Ok(self.entry(name)?.cast.clone())
    }

    /// The attached handler, if any.
    ///
    /// # Errors
    /// `UnknownHandler` if `name` was never registered.
    pub fn get(&self, name: &str) -> Result<Option<HandlerRef>, Error> {
        Ok(self.entry(name)?.current.clone())
    }

    /// Whether `name` has a cast, attached or not.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Makes `new` the handler for `name`, detaching the old one from `tree`
    /// and attaching the new one in a single step. Installing the handler
    /// that is already current does nothing.
    ///
    /// # Errors
    /// `UnknownHandler` if `name` was never registered.
    pub fn install(
        &mut self,
        name: &str,
        new: Option<HandlerRef>,
        tree: &LoggerTree,
    ) -> Result<(), Error> {
        check_name(name)?;
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| Error::UnknownHandler(name.to_string()))?;

        let unchanged = match (&entry.current, &new) {
            (Some(old), Some(new)) => same_handler(old, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return Ok(());
        }

        tree.swap_handler(entry.current.as_ref(), new.as_ref());
        entry.current = new;
        Ok(())
    }

    /// Casts `value` with the registered cast, then installs the result.
    ///
    /// # Errors
    /// `UnknownHandler`, or the cast's error; nothing changes on error.
    pub fn set(
        &mut self,
        name: &str,
        value: HandlerValue,
        ctx: &CastContext<'_>,
        tree: &LoggerTree,
    ) -> Result<(), Error> {
        let handler = self.cast(name)?.call(value, ctx)?;
        self.install(name, handler, tree)
    }

    /// Detaches and forgets the current handler; the cast stays registered.
    ///
    /// # Errors
    /// `UnknownHandler` if `name` was never registered.
    pub fn delete(&mut self, name: &str, tree: &LoggerTree) -> Result<(), Error> {
        self.install(name, None, tree)
    }
}
