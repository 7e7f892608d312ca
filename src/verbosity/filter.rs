//! Per-handler verbosity thresholds: a console can show `app.net` at DEBUG
//! from `-vv` on while the export keeps it at WARNING.

use super::{Verbosity, VerbosityLevels};
use crate::level::Level;
use crate::names;
use std::collections::BTreeMap;

/// Logger-name hierarchies mapped to breakpoint tables.
///
/// Entries are kept most-specific first so the first hierarchy match is the
/// one that applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerbosityLevelsFilter {
    entries: Vec<(String, VerbosityLevels)>,
}

impl VerbosityLevelsFilter {
    /// Builds a filter from `(logger name, table)` pairs. Names are normalized.
    #[must_use]
    pub fn new(levels: impl IntoIterator<Item = (String, VerbosityLevels)>) -> Self {
        let mut entries: Vec<(String, VerbosityLevels)> = levels
            .into_iter()
            .map(|(name, levels)| (names::normalize(&name), levels))
            .collect();
        // Deeper names first; root sorts last.
        entries.sort_by(|(a, _), (b, _)| depth(b).cmp(&depth(a)).then_with(|| a.cmp(b)));
        entries.dedup_by(|(a, _), (b, _)| a == b);
        Self { entries }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The table governing `name`, if any hierarchy covers it.
    #[must_use]
    pub fn levels_for(&self, name: &str) -> Option<&VerbosityLevels> {
        self.entries
            .iter()
            .find(|(hierarchy, _)| names::is_in_hierarchy(hierarchy, name))
            .map(|(_, levels)| levels)
    }

    /// Whether a record from `name` at `level` passes at `verbosity`.
    ///
    /// With no verbosity set, or no covering hierarchy, everything passes.
    #[must_use]
    pub fn allows(&self, name: &str, level: Level, verbosity: Option<Verbosity>) -> bool {
        let Some(verbosity) = verbosity else {
            return true;
        };
        self.levels_for(name)
            .is_none_or(|levels| level >= levels.resolve(verbosity))
    }
}

impl From<BTreeMap<String, VerbosityLevels>> for VerbosityLevelsFilter {
    fn from(map: BTreeMap<String, VerbosityLevels>) -> Self {
        Self::new(map)
    }
}

fn depth(name: &str) -> usize {
    if names::is_root(name) {
        0
    } else {
        name.split('.').count()
    }
}
