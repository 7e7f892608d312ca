//! Configuration file schema.

use crate::setup::LevelSetting;
use crate::verbosity::VerbosityLevels;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Everything is optional: an empty file configures nothing.
///
/// ```toml
/// level = "info"
/// verbosity = 2
/// console = true
///
/// [verbosity_levels]
/// myapp = [[0, "warning"], [2, "info"], [3, "debug"]]
///
/// [export]
/// filename = "~/logs/app.jsonl"
/// formatter = { encoder = "pretty" }
///
/// [theme]
/// "log.name" = "blue dim"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `"info"`, `20`, or a `[level]` table of logger name to level.
    pub level: Option<LevelSetting>,
    /// Signed so negative values get a proper validation error.
    pub verbosity: Option<i64>,
    pub verbosity_levels: BTreeMap<String, VerbosityLevels>,
    /// Passed to the `console` cast: bool, stream name, level, or a table.
    pub console: Option<serde_json::Value>,
    /// Passed to the `export` cast: a path or a table.
    pub export: Option<serde_json::Value>,
    /// Style overrides on top of the default theme.
    pub theme: BTreeMap<String, String>,
    /// Values for custom named handlers, by name.
    pub handlers: BTreeMap<String, serde_json::Value>,
}
