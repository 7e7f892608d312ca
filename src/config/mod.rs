//! TOML configuration loading and the `LOG_LEVEL` environment override.
//!
//! Separated from the struct definitions so the loading logic (file lookup,
//! environment merge, conversion into a `Setup`) stays independent of the
//! serde schema.

mod structs;

pub use structs::Config;

use crate::Error;
use crate::fmt::Theme;
use crate::handler::HandlerValue;
use crate::internal;
use crate::level::Level;
use crate::setup::{LevelSetting, Setup};
use crate::verbosity::as_verbosity;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable with `name:level` overrides.
pub const LEVEL_ENV_VAR: &str = "LOG_LEVEL";

impl Config {
    /// Loads the default config file, then applies `LOG_LEVEL`.
    ///
    /// # Errors
    /// No config directory for this platform, unreadable file, bad TOML, or
    /// a bad `LOG_LEVEL`.
    pub fn load() -> Result<Self, Error> {
        internal::debug("config", "loading config from default location");
        let path = Self::get_config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Loads `path`; a missing file is an empty config.
    ///
    /// # Errors
    /// Unreadable file or bad TOML.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            internal::debug(
                "config",
                &format!("{} not found, using defaults", path.display()),
            );
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        internal::info("config", &format!("loaded {}", path.display()));
        Ok(config)
    }

    /// # Errors
    /// Bad TOML or values of the wrong shape.
    pub fn from_toml(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// `<platform config dir>/splatlog/config.toml`.
    ///
    /// # Errors
    /// `ConfigDirNotFound` when the platform has no home/config directory.
    pub fn get_config_path() -> Result<PathBuf, Error> {
        directories::ProjectDirs::from("", "", "splatlog")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(Error::ConfigDirNotFound)
    }

    /// Merges `LOG_LEVEL` (if set and non-empty) over the file's `level`.
    ///
    /// # Errors
    /// An unparseable `LOG_LEVEL`.
    pub fn apply_env(&mut self) -> Result<(), Error> {
        match std::env::var(LEVEL_ENV_VAR) {
            Ok(spec) if !spec.trim().is_empty() => self.apply_level_spec(&spec),
            _ => Ok(()),
        }
    }

    /// Merges a `LOG_LEVEL`-style spec over the configured levels.
    ///
    /// # Errors
    /// See [`parse_level_spec`].
    pub fn apply_level_spec(&mut self, spec: &str) -> Result<(), Error> {
        let parsed = parse_level_spec(spec)?;
        self.level = Some(match self.level.take() {
            Some(existing) => existing.merged(parsed),
            None => parsed,
        });
        Ok(())
    }

    /// Converts into a [`Setup`].
    ///
    /// # Errors
    /// A negative verbosity or an unparseable theme style.
    pub fn into_setup(self) -> Result<Setup, Error> {
        let mut setup = Setup::new();

        if !self.theme.is_empty() {
            setup = setup.theme(Theme::from_specs(
                self.theme.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            )?);
        }
        setup.level = self.level;
        setup.verbosity_levels = self.verbosity_levels;
        if let Some(verbosity) = self.verbosity {
            setup = setup.verbosity(as_verbosity(verbosity)?);
        }
        setup.console = self.console.map(HandlerValue::Json);
        setup.export = self.export.map(HandlerValue::Json);
        setup.named = self
            .handlers
            .into_iter()
            .map(|(name, value)| (name, HandlerValue::Json(value)))
            .collect();
        Ok(setup)
    }
}

/// Parses `"info"` or `"app:debug,app.net:warning,error"`.
///
/// A bare level applies to the root logger; later entries win.
///
/// # Errors
/// `InvalidLevel` for an unknown level, `Validation` for an entry with an
/// empty name or level.
pub fn parse_level_spec(spec: &str) -> Result<LevelSetting, Error> {
    let mut levels: BTreeMap<String, Level> = BTreeMap::new();
    let mut only_root = true;

    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, level) = match entry.rsplit_once(':') {
            Some((name, level)) => {
                let name = name.trim();
                if name.is_empty() || level.trim().is_empty() {
                    return Err(Error::validation(format!(
                        "expected `name:level` in {LEVEL_ENV_VAR}, given {entry:?}"
                    )));
                }
                only_root = false;
                (crate::names::normalize(name), level.trim())
            }
            None => (crate::names::ROOT.to_string(), entry),
        };
        levels.insert(name, level.parse::<Level>()?);
    }

    if levels.is_empty() {
        return Err(Error::validation(format!("{LEVEL_ENV_VAR} is empty")));
    }

    if only_root && let Some(level) = levels.get(crate::names::ROOT) {
        return Ok(LevelSetting::All(*level));
    }
    Ok(LevelSetting::ByName(levels))
}
