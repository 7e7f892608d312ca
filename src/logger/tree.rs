//! Per-name levels and the root handler list.
//!
//! Log calls only take read locks here. Handler changes swap old for new in a
//! single write section so readers never see both or neither.

use crate::handler::{HandlerRef, same_handler};
use crate::level::Level;
use crate::names;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Level applied to the root logger until configured otherwise.
pub const ROOT_DEFAULT_LEVEL: Level = Level::Warning;

pub struct LoggerTree {
    levels: RwLock<HashMap<String, Level>>,
    handlers: RwLock<Vec<HandlerRef>>,
}

impl Default for LoggerTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoggerTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerTree")
            .field("levels", &*self.levels.read().unwrap_or_else(PoisonError::into_inner))
            .field("handlers", &self.handler_count())
            .finish()
    }
}

impl LoggerTree {
    #[must_use]
    pub fn new() -> Self {
        let mut levels = HashMap::new();
        levels.insert(names::ROOT.to_string(), ROOT_DEFAULT_LEVEL);
        Self {
            levels: RwLock::new(levels),
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// `NotSet` on a non-root name makes it inherit again.
    pub fn set_level(&self, name: &str, level: Level) {
        let key = names::normalize(name);
        let mut levels = self.levels.write().unwrap_or_else(PoisonError::into_inner);
        if level == Level::NotSet && key != names::ROOT {
            levels.remove(&key);
        } else {
            levels.insert(key, level);
        }
    }

    /// The level set on `name` itself; `NotSet` when it inherits.
    #[must_use]
    pub fn level(&self, name: &str) -> Level {
        let levels = self.levels.read().unwrap_or_else(PoisonError::into_inner);
        levels.get(&names::normalize(name)).copied().unwrap_or_default()
    }

    /// First level set walking from `name` up to the root.
    #[must_use]
    pub fn effective_level(&self, name: &str) -> Level {
        let key = names::normalize(name);
        let levels = self.levels.read().unwrap_or_else(PoisonError::into_inner);
        names::ancestry(&key)
            .filter_map(|n| levels.get(n).copied())
            .find(|level| *level != Level::NotSet)
            .unwrap_or(Level::NotSet)
    }

    /// Removes `old` (if present) and appends `new` (if any) under one write lock.
    pub fn swap_handler(&self, old: Option<&HandlerRef>, new: Option<&HandlerRef>) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = old {
            handlers.retain(|h| !same_handler(h, old));
        }
        if let Some(new) = new
            && !handlers.iter().any(|h| same_handler(h, new))
        {
            handlers.push(new.clone());
        }
    }

    /// Attaches `handler` unless it is already attached.
    pub fn add_handler(&self, handler: &HandlerRef) {
        self.swap_handler(None, Some(handler));
    }

    /// Detaches `handler`; a no-op when it is not attached.
    pub fn remove_handler(&self, handler: &HandlerRef) {
        self.swap_handler(Some(handler), None);
    }

    /// Snapshot of the attached handlers, in attach order.
    #[must_use]
    pub fn handlers(&self) -> Vec<HandlerRef> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of attached handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn contains_handler(&self, handler: &HandlerRef) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|h| same_handler(h, handler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{ExportHandler, SharedBuffer, Stream};
    use std::sync::Arc;

    #[test]
    fn levels_inherit_up_the_hierarchy() {
        let tree = LoggerTree::new();
        assert_eq!(tree.effective_level("app.net"), Level::Warning);
        tree.set_level("app", Level::Debug);
        assert_eq!(tree.effective_level("app.net"), Level::Debug);
        assert_eq!(tree.level("app.net"), Level::NotSet);
        tree.set_level("app", Level::NotSet);
        assert_eq!(tree.effective_level("app.net"), Level::Warning);
    }

    #[test]
    fn swap_replaces_in_one_step() {
        let tree = LoggerTree::new();
        let a: HandlerRef = Arc::new(ExportHandler::new(Stream::from(SharedBuffer::new())));
        let b: HandlerRef = Arc::new(ExportHandler::new(Stream::from(SharedBuffer::new())));
        tree.add_handler(&a);
        tree.add_handler(&a);
        assert_eq!(tree.handler_count(), 1);
        tree.swap_handler(Some(&a), Some(&b));
        assert!(!tree.contains_handler(&a));
        assert!(tree.contains_handler(&b));
    }
}
