//! Breakpoint tables: an ordered list of `(verbosity, level)` pairs that
//! partitions `0..MAX_VERBOSITY` into half-open ranges, each with a level.

use super::{MAX_VERBOSITY, Verbosity, as_verbosity, check_verbosity};
use crate::Error;
use crate::level::Level;
use serde::Deserialize;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A single breakpoint: from this verbosity on, this level applies.
pub type VerbosityLevel = (Verbosity, Level);

/// One resolved segment of the step function.
pub type VerbosityRange = (Range<Verbosity>, Level);

/// Immutable breakpoint table. Cloning shares the underlying slice.
///
/// Invariants, checked on construction:
/// - at least one breakpoint
/// - verbosities unique (input is sorted)
/// - severity never increases as verbosity increases
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<(i64, Level)>")]
pub struct VerbosityLevels {
    breakpoints: Arc<[VerbosityLevel]>,
}

impl VerbosityLevels {
    /// Builds a table from breakpoints in any order.
    ///
    /// # Errors
    /// `Error::Validation` when empty, when a verbosity repeats, when a
    /// verbosity is the reserved maximum, or when a later breakpoint is more
    /// severe than an earlier one.
    pub fn new(pairs: impl IntoIterator<Item = VerbosityLevel>) -> Result<Self, Error> {
        let mut breakpoints: Vec<VerbosityLevel> = pairs.into_iter().collect();

        if breakpoints.is_empty() {
            return Err(Error::validation("verbosity levels can not be empty"));
        }

        breakpoints.sort_by_key(|(verbosity, _)| *verbosity);

        for (verbosity, _) in &breakpoints {
            check_verbosity(*verbosity)?;
        }

        for pair in breakpoints.windows(2) {
            let (v_a, level_a) = pair[0];
            let (v_b, level_b) = pair[1];
            if v_a == v_b {
                return Err(Error::validation(format!(
                    "duplicate verbosity {v_a} in verbosity levels"
                )));
            }
            if level_b > level_a {
                return Err(Error::validation(format!(
                    "level {level_b} at verbosity {v_b} is more severe than {level_a} at verbosity {v_a}"
                )));
            }
        }

        Ok(Self {
            breakpoints: breakpoints.into(),
        })
    }

    /// Same as [`new`](Self::new) for signed input from config files.
    ///
    /// # Errors
    /// Negative verbosities, plus everything `new` rejects.
    pub fn try_from_signed(
        pairs: impl IntoIterator<Item = (i64, Level)>,
    ) -> Result<Self, Error> {
        let checked = pairs
            .into_iter()
            .map(|(verbosity, level)| as_verbosity(verbosity).map(|v| (v, level)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(checked)
    }

    /// The level in effect at `verbosity`: the greatest breakpoint at or
    /// below it wins, the last breakpoint extends forever, and anything below
    /// the first breakpoint is [`Level::NotSet`].
    #[must_use]
    pub fn resolve(&self, verbosity: Verbosity) -> Level {
        let idx = self.breakpoints.partition_point(|(v, _)| *v <= verbosity);
        idx.checked_sub(1)
            .map_or(Level::NotSet, |i| self.breakpoints[i].1)
    }

    /// Breakpoints sorted by verbosity.
    #[must_use]
    pub fn breakpoints(&self) -> &[VerbosityLevel] {
        &self.breakpoints
    }

    /// The half-open ranges `[v_i, v_{i+1})`; the last ends at [`MAX_VERBOSITY`].
    #[must_use]
    pub fn ranges(&self) -> Vec<VerbosityRange> {
        self.breakpoints
            .iter()
            .enumerate()
            .map(|(i, (start, level))| {
                let end = self
                    .breakpoints
                    .get(i + 1)
                    .map_or(MAX_VERBOSITY, |(next, _)| *next);
                (*start..end, *level)
            })
            .collect()
    }
}

impl TryFrom<Vec<(i64, Level)>> for VerbosityLevels {
    type Error = Error;

    fn try_from(pairs: Vec<(i64, Level)>) -> Result<Self, Self::Error> {
        Self::try_from_signed(pairs)
    }
}

impl TryFrom<&[VerbosityLevel]> for VerbosityLevels {
    type Error = Error;

    fn try_from(pairs: &[VerbosityLevel]) -> Result<Self, Self::Error> {
        Self::new(pairs.iter().copied())
    }
}

impl<const N: usize> TryFrom<[VerbosityLevel; N]> for VerbosityLevels {
    type Error = Error;

    fn try_from(pairs: [VerbosityLevel; N]) -> Result<Self, Self::Error> {
        Self::new(pairs)
    }
}

impl fmt::Display for VerbosityLevels {
    /// `[0, 1]: WARNING, [2]: INFO, [3, ...]: DEBUG`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (range, level)) in self.ranges().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let last = range.end - 1;
            if range.end == MAX_VERBOSITY {
                write!(f, "[{}, ...]: {level}", range.start)?;
            } else if last == range.start {
                write!(f, "[{}]: {level}", range.start)?;
            } else if last == range.start + 1 {
                write!(f, "[{}, {last}]: {level}", range.start)?;
            } else {
                write!(f, "[{}, ..., {last}]: {level}", range.start)?;
            }
        }
        Ok(())
    }
}
