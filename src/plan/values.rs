use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named values attached to a plan or district (`summary`, `totals`, `compactness`).
///
/// Values are kept as raw JSON: scoring model versions disagree on which keys
/// exist and occasionally store non-numeric placeholders.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(BTreeMap<String, Value>);

/// The plan-wide metric map.
pub type Summary = Values;

impl Values {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

    /// Whether the key is present at all, even with a null value.
    pub fn contains(&self, key: &str) -> bool { self.0.contains_key(key) }

    /// Numeric value for `key`; `None` when missing or not a JSON number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
