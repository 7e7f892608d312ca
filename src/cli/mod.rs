//! Command-line support: reusable verbosity arguments for applications, and
//! the `splatlog` binary that emits a single record.

use crate::config::{Config, parse_level_spec};
use crate::data::{Data, Value};
use crate::handler::HandlerValue;
use crate::level::{DEFAULT_APP_LEVEL, Level};
use crate::logging::Logging;
use crate::setup::Setup;
use crate::verbosity::{Verbosity, VerbosityLevels};
use crate::{Error, internal};
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;
use std::str::FromStr;

/// `-v`/`--log-level` flags to flatten into an application's own parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct VerbosityArgs {
    /// More output; repeat for more (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Logger levels, e.g. `debug` or `app.net:debug,app:info`
    #[arg(long = "log-level", value_name = "[NAME:]LEVEL")]
    pub log_level: Vec<String>,
}

impl VerbosityArgs {
    /// The `-v` count as a verbosity.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from(self.verbose)
    }

    /// Adds the flags to `setup`: the verbosity when any `-v` was given and
    /// `--log-level` entries over whatever levels `setup` already has.
    ///
    /// # Errors
    /// An unparseable `--log-level`.
    pub fn apply_to(&self, mut setup: Setup) -> Result<Setup, Error> {
        if self.verbose > 0 {
            setup = setup.verbosity(self.verbosity());
        }
        for spec in &self.log_level {
            let parsed = parse_level_spec(spec)?;
            setup.level = Some(match setup.level.take() {
                Some(existing) => existing.merged(parsed),
                None => parsed,
            });
        }
        Ok(setup)
    }
}

/// A `KEY=VALUE` splat argument. Values that parse as JSON keep their type.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
}

impl FromStr for KeyValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, raw) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, given {s:?}"))?;
        if key.is_empty() {
            return Err(format!("empty key in {s:?}"));
        }
        let value = serde_json::from_str::<serde_json::Value>(raw)
            .map_or_else(|_| Value::from(raw), Value::from);
        Ok(Self {
            key: key.to_string(),
            value,
        })
    }
}

/// splatlog - emit one log record through splatlog's handlers.
#[derive(Debug, Parser)]
#[command(name = "splatlog", version, about = "Emit one structured log record")]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: VerbosityArgs,

    /// Config file instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also append the record as JSON to FILE
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Logger name
    #[arg(long, default_value = "splatlog")]
    pub name: String,

    /// Log level (name or number)
    pub level: Level,

    /// Message; `{key}` placeholders are filled from the data
    pub message: String,

    /// Splat data as KEY=VALUE pairs
    pub data: Vec<KeyValue>,
}

impl Cli {
    /// Turns config, environment and flags into a `Setup`.
    ///
    /// The emitting logger shows `INFO` by default and `DEBUG` from `-v` on
    /// unless the config binds its own table; console output is on unless the
    /// config says otherwise.
    ///
    /// # Errors
    /// Config loading and validation failures.
    pub fn setup(&self) -> Result<Setup, Error> {
        let config = match &self.config {
            Some(path) => {
                let mut config = Config::load_from(path)?;
                config.apply_env()?;
                config
            }
            None => match Config::load() {
                Err(Error::ConfigDirNotFound) => {
                    internal::warn("cli", "no config directory, using defaults");
                    let mut config = Config::default();
                    config.apply_env()?;
                    config
                }
                other => other?,
            },
        };

        let mut setup = config.into_setup()?;
        if !setup.verbosity_levels.contains_key(&self.name) {
            let levels = VerbosityLevels::new([(0, DEFAULT_APP_LEVEL), (1, Level::Debug)])?;
            setup = setup.verbosity_levels(&self.name, levels);
            if setup.verbosity.is_none() {
                setup = setup.verbosity(0);
            }
        }
        if setup.console.is_none() {
            setup = setup.console(true);
        }
        if let Some(path) = &self.export {
            setup.export = Some(HandlerValue::Path(path.clone()));
        }
        self.verbosity.apply_to(setup)
    }

    /// `KEY=VALUE` arguments in command-line order.
    #[must_use]
    pub fn data(&self) -> Data {
        self.data
            .iter()
            .map(|kv| (kv.key.clone(), kv.value.clone()))
            .collect()
    }
}

/// Configures `logging` from `cli` and emits the record.
///
/// # Errors
/// Setup failures; emission itself never fails.
pub fn run(cli: &Cli, logging: &std::sync::Arc<Logging>) -> Result<(), Error> {
    logging.setup(cli.setup()?)?;
    internal::debug("cli", &format!("emitting as '{}'", cli.name));
    logging
        .get_logger(&cli.name)
        .log(cli.level, &cli.message, cli.data());
    logging.flush();
    Ok(())
}
