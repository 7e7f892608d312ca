//! Role bindings (logger name → breakpoint table) and the current verbosity.
//!
//! This is plain data: callers hold the logging context's lock while
//! mutating it and apply the returned level assignments to the logger tree.

use super::{Verbosity, VerbosityLevels, check_verbosity};
use crate::Error;
use crate::level::Level;
use crate::names;
use std::collections::BTreeMap;

/// A logger level the caller must apply after a state change.
pub type LevelAssignment = (String, Level);

#[derive(Debug, Clone, Default)]
pub struct VerbosityState {
    roles: BTreeMap<String, VerbosityLevels>,
    current: Option<Verbosity>,
}

impl VerbosityState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `levels` to the logger `name`, replacing any previous table.
    ///
    /// Returns the assignment to apply now when a verbosity is already set.
    pub fn set_levels(&mut self, name: &str, levels: VerbosityLevels) -> Option<LevelAssignment> {
        let name = names::normalize(name);
        let assignment = self
            .current
            .map(|verbosity| (name.clone(), levels.resolve(verbosity)));
        self.roles.insert(name, levels);
        assignment
    }

    /// The table bound to `name`.
    #[must_use]
    pub fn levels(&self, name: &str) -> Option<&VerbosityLevels> {
        self.roles.get(&names::normalize(name))
    }

    /// Unbinds `name`. The logger keeps whatever level it last received.
    pub fn del_levels(&mut self, name: &str) -> Option<VerbosityLevels> {
        self.roles.remove(&names::normalize(name))
    }

    /// Every bound name with its table.
    pub fn roles(&self) -> impl Iterator<Item = (&str, &VerbosityLevels)> {
        self.roles.iter().map(|(name, levels)| (name.as_str(), levels))
    }

    /// The current verbosity, if set.
    #[must_use]
    pub const fn verbosity(&self) -> Option<Verbosity> {
        self.current
    }

    /// Sets the dial and re-resolves every role.
    ///
    /// # Errors
    /// `Error::Validation` for the reserved maximum.
    pub fn set_verbosity(&mut self, verbosity: Verbosity) -> Result<Vec<LevelAssignment>, Error> {
        let verbosity = check_verbosity(verbosity)?;
        self.current = Some(verbosity);
        Ok(self.resolved())
    }

    /// Clears the dial. Levels already applied stay where they are.
    pub const fn del_verbosity(&mut self) -> Option<Verbosity> {
        self.current.take()
    }

    /// Every role resolved at the current verbosity; empty while unset.
    #[must_use]
    pub fn resolved(&self) -> Vec<LevelAssignment> {
        let Some(verbosity) = self.current else {
            return Vec::new();
        };
        self.roles
            .iter()
            .map(|(name, levels)| (name.clone(), levels.resolve(verbosity)))
            .collect()
    }
}
