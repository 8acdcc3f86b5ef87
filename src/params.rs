use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordered option mapping of one node.
///
/// A key mapped to `None` is a documented option the caller left unset; the
/// engine default applies and the key is skipped when serializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    entries: IndexMap<String, Option<Value>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key`, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries
            .insert(key.into(), Some(value.into()))
            .flatten()
    }

    /// Records a documented option, set or not.
    pub fn declare(&mut self, key: &str, value: Option<Value>) {
        self.entries.insert(key.to_string(), value);
    }

    /// Layers passthrough options on top of the declared ones.
    ///
    /// Declared options that are already set keep their value.
    pub fn merge_extra(&mut self, extra: Params) {
        for (key, value) in extra.entries {
            match self.entries.get_mut(&key) {
                Some(Some(_)) => {
                    debug!(%key, "Declared option takes precedence over passthrough value");
                }
                Some(slot) => *slot = value,
                None => {
                    self.entries.insert(key, value);
                }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    /// Whether `key` is present, even if unset.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    /// Only the entries carrying a value, in insertion order.
    pub fn iter_set(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|value| (key.as_str(), value)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}
