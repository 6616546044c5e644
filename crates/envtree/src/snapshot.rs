//! Point-in-time capture of env variables referenced by a config.

use std::collections::{HashMap, hash_map};

use crate::ConfigSource;

/// Immutable capture of all env variables referenced by a [`FieldTree`](crate::FieldTree).
///
/// Each referenced variable is mapped either to its value, or to an "unset" marker. Variables not referenced
/// by the tree are not captured and behave as unset.
#[derive(Debug, Clone, Default)]
pub struct KeySnapshot {
    values: HashMap<&'static str, Option<String>>,
}

impl KeySnapshot {
    /// Resolves the provided keys using `source`. Each distinct key is looked up exactly once;
    /// duplicate keys are skipped.
    #[tracing::instrument(level = "debug", name = "KeySnapshot::resolve", skip_all)]
    pub fn resolve<S>(keys: impl IntoIterator<Item = &'static str>, source: &S) -> Self
    where
        S: ConfigSource + ?Sized,
    {
        let mut values = HashMap::new();
        for key in keys {
            if let hash_map::Entry::Vacant(entry) = values.entry(key) {
                entry.insert(source.lookup(key));
            }
        }

        let set_count = values.values().filter(|value| value.is_some()).count();
        tracing::debug!(
            referenced_count = values.len(),
            set_count,
            "resolved env variables"
        );
        Self { values }
    }

    /// Returns the value of the specified variable, or `None` if it's unset or not captured.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key)?.as_deref()
    }

    /// Checks whether the specified variable was captured (regardless of whether it is set).
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the number of captured variables, including unset ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether this snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all captured variables in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        self.values
            .iter()
            .map(|(&key, value)| (key, value.as_deref()))
    }
}
