//! One call to configure a logging context, the way applications usually want
//! to at startup (and again once options are parsed).
//!
//! Every field is optional and absent fields leave the context alone. Steps
//! run in a fixed order: theme, level, verbosity levels, verbosity, console,
//! export, then custom named handlers.

use crate::Error;
use crate::fmt::Theme;
use crate::handler::HandlerValue;
use crate::internal;
use crate::level::Level;
use crate::logging::Logging;
use crate::names;
use crate::verbosity::{Verbosity, VerbosityLevels};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A single level for the root logger, or levels per logger name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LevelSetting {
    All(Level),
    ByName(BTreeMap<String, Level>),
}

impl From<Level> for LevelSetting {
    fn from(level: Level) -> Self {
        Self::All(level)
    }
}

impl LevelSetting {
    /// `(logger name, level)` pairs this setting assigns.
    #[must_use]
    pub fn assignments(&self) -> Vec<(String, Level)> {
        match self {
            Self::All(level) => vec![(names::ROOT.to_string(), *level)],
            Self::ByName(map) => map.iter().map(|(n, l)| (n.clone(), *l)).collect(),
        }
    }

    /// Layers `other` on top: names in `other` win.
    #[must_use]
    pub fn merged(self, other: Self) -> Self {
        let mut map: BTreeMap<String, Level> = self.assignments().into_iter().collect();
        map.extend(other.assignments());
        Self::ByName(map)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Setup {
    pub theme: Option<Theme>,
    pub level: Option<LevelSetting>,
    pub verbosity_levels: BTreeMap<String, VerbosityLevels>,
    pub verbosity: Option<Verbosity>,
    pub console: Option<HandlerValue>,
    pub export: Option<HandlerValue>,
    /// Custom named handlers, set in order.
    pub named: Vec<(String, HandlerValue)>,
}

impl Setup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the context theme before any handler is built.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Root logger level, or a full per-name map.
    #[must_use]
    pub fn level(mut self, level: impl Into<LevelSetting>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Adds one per-name level, keeping any already given.
    #[must_use]
    pub fn level_for(mut self, name: &str, level: Level) -> Self {
        let single = LevelSetting::ByName(BTreeMap::from([(name.to_string(), level)]));
        self.level = Some(match self.level.take() {
            Some(existing) => existing.merged(single),
            None => single,
        });
        self
    }

    /// Binds a verbosity table to logger `name`.
    #[must_use]
    pub fn verbosity_levels(mut self, name: &str, levels: VerbosityLevels) -> Self {
        self.verbosity_levels.insert(name.to_string(), levels);
        self
    }

    /// Sets the verbosity after the tables are bound.
    #[must_use]
    pub const fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }

    /// `false` or [`HandlerValue::Off`] removes the console handler.
    #[must_use]
    pub fn console(mut self, value: impl Into<HandlerValue>) -> Self {
        self.console = Some(value.into());
        self
    }

    /// Value for the `export` named handler.
    #[must_use]
    pub fn export(mut self, value: impl Into<HandlerValue>) -> Self {
        self.export = Some(value.into());
        self
    }

    /// Sets a custom named handler; its cast must be registered by apply time.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>, value: impl Into<HandlerValue>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    /// Whether applying would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.theme.is_none()
            && self.level.is_none()
            && self.verbosity_levels.is_empty()
            && self.verbosity.is_none()
            && self.console.is_none()
            && self.export.is_none()
            && self.named.is_empty()
    }

    /// # Errors
    /// The first failing step. Steps before it stay applied.
    pub fn apply(self, logging: &Logging) -> Result<(), Error> {
        if let Some(theme) = self.theme {
            logging.set_theme(theme);
        }

        if let Some(level) = &self.level {
            for (name, level) in level.assignments() {
                logging.set_level(&name, level);
            }
        }

        for (name, levels) in self.verbosity_levels {
            logging.set_verbosity_levels(&name, levels);
        }

        if let Some(verbosity) = self.verbosity {
            logging.set_verbosity(verbosity)?;
        }

        if let Some(console) = self.console {
            logging.set_named_handler("console", console)?;
        }

        if let Some(export) = self.export {
            logging.set_named_handler("export", export)?;
        }

        for (name, value) in self.named {
            logging.set_named_handler(&name, value)?;
        }

        internal::debug("setup", "applied");
        Ok(())
    }
}
