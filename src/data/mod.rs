//! Splat data: the keyed values attached to a single log record.

mod value;

pub use value::{RichText, Value};

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Insertion-ordered mapping of names to values.
///
/// Small and scanned linearly; re-inserting a key replaces its value in place
/// so output order always matches first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Data {
    entries: Vec<(String, Value)>,
}

impl Data {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// The value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl From<()> for Data {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Data {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        data.extend(iter);
        data
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Data {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Data {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Data {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Builds [`Data`] from `name = value` pairs.
///
/// ```
/// use splatlog::splat;
///
/// let data = splat! { host = "example.com", port = 8080 };
/// assert_eq!(data.len(), 2);
/// assert!(splat! {}.is_empty());
/// ```
#[macro_export]
macro_rules! splat {
    () => {
        $crate::Data::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {{
        let mut data = $crate::Data::new();
        $(data.insert(stringify!($key), $value);)+
        data
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsert_keeps_position() {
        let mut data = Data::from([("x", 1), ("y", 2)]);
        data.insert("x", 3);
        let keys: Vec<&str> = data.keys().collect();
        assert_eq!(keys, vec!["x", "y"]);
        assert_eq!(data.get("x"), Some(&Value::Int(3)));
    }

    #[test]
    fn serializes_in_insertion_order() {
        let data = splat! { zeta = 1, alpha = "a" };
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"zeta":1,"alpha":"a"}"#
        );
    }
}
