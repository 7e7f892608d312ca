//! splatlog's own diagnostics.
//!
//! Handler failures and config problems can't go through the handlers they
//! are about, so they are written straight to stderr. Only errors are shown
//! unless `SPLATLOG_INTERNAL` names another level (`debug`, `warning`, `30`)
//! or `off`; the threshold is read once via `OnceLock`.

use crate::level::Level;
use std::io::Write;
use std::sync::OnceLock;

pub const ENV_VAR: &str = "SPLATLOG_INTERNAL";

static THRESHOLD: OnceLock<Option<Level>> = OnceLock::new();

fn threshold() -> Option<Level> {
    *THRESHOLD.get_or_init(|| {
        std::env::var(ENV_VAR).map_or(Some(Level::Error), |raw| {
            match raw.trim().to_lowercase().as_str() {
                "" | "off" | "none" | "0" => None,
                other => Some(other.parse::<Level>().unwrap_or(Level::Error)),
            }
        })
    })
}

/// Whether a diagnostic at `level` would be printed.
#[must_use]
pub fn enabled(level: Level) -> bool {
    threshold().is_some_and(|min| level >= min)
}

/// Pre-threshold calls and disabled levels are dropped silently.
fn log(level: Level, scope: &str, msg: &str) {
    if !enabled(level) {
        return;
    }
    let _ = writeln!(
        std::io::stderr().lock(),
        "[splatlog] {:<8} {scope}: {msg}",
        level.as_str()
    );
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warning, scope, msg);
}

/// Emission failures end up here; logging calls themselves never fail.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
