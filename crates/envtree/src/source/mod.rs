//! Key–value sources for config params.

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
    rc::Rc,
    sync::Arc,
};

pub use self::env::Environment;

mod env;

/// Source of raw string values for config params, keyed by the env variable name.
///
/// Implementations should be side effect-free; a source is queried at most once per key
/// during a single populate call.
pub trait ConfigSource {
    /// Looks up the value for the specified key. Returns `None` if the key is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Rc<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Arc<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<H: BuildHasher> ConfigSource for HashMap<String, String, H> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Fixed in-memory key–value source. Useful for testing, or for variables supplied by other means
/// than the process environment (e.g., command-line args or a dotenv file parsed elsewhere).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueMap {
    map: HashMap<String, String>,
}

impl KeyValueMap {
    /// Creates a map with the specified entries. If a key is repeated, the last value wins.
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        entries.into_iter().collect()
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    /// Adds a value to this map.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes a value from this map.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.map.remove(key)
    }

    /// Returns the number of entries in this map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Checks whether this map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for KeyValueMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()));
        Self { map: map.collect() }
    }
}

impl<K, V> Extend<(K, V)> for KeyValueMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()));
        self.map.extend(entries);
    }
}

impl ConfigSource for KeyValueMap {
    fn lookup(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_map_basics() {
        let mut map = KeyValueMap::new([("A", "1"), ("B", "2"), ("A", "3")]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.lookup("A").as_deref(), Some("3"));
        assert_eq!(map.lookup("a"), None);

        map.extend([("C", String::new())]);
        assert_eq!(map.lookup("C").as_deref(), Some(""));
        assert_eq!(map.remove("B").as_deref(), Some("2"));
        assert_eq!(map.lookup("B"), None);

        let map = KeyValueMap::default().with("D", "4");
        assert_eq!(map.lookup("D").as_deref(), Some("4"));
    }

    #[test]
    fn dyn_sources() {
        let map = KeyValueMap::new([("A", "1")]);
        let boxed: Box<dyn ConfigSource> = Box::new(map.clone());
        assert_eq!(boxed.lookup("A").as_deref(), Some("1"));
        let shared: Arc<dyn ConfigSource + Send + Sync> = Arc::new(map);
        assert_eq!(shared.lookup("A").as_deref(), Some("1"));

        let std_map = HashMap::from([("A".to_owned(), "2".to_owned())]);
        assert_eq!(std_map.lookup("A").as_deref(), Some("2"));
    }
}
