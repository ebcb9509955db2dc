use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Values;

/// One entry of a plan's `districts` list. Its identity is its index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct District {
    pub totals: Values,
    pub compactness: Option<Values>,
    /// Display label; present-but-null is kept so it renders as a dash.
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub number: Option<Value>,
    pub is_counted: Option<bool>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl District {
    /// Value of `field` from `totals`, falling back to `compactness`.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.totals.get(field)
            .or_else(|| self.compactness.as_ref().and_then(|c| c.get(field)))
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.totals.contains(field) || self.compactness.as_ref().is_some_and(|c| c.contains(field))
    }

    /// Numeric total for `field`.
    pub fn total(&self, field: &str) -> Option<f64> { self.totals.number(field) }

    /// False only when the scoring service excluded this district from partisan metrics.
    pub fn is_counted(&self) -> bool { self.is_counted != Some(false) }

    /// Row label for the district at `index`.
    pub fn label(&self, index: usize) -> String {
        match &self.number {
            Some(value) => match value.as_f64() {
                Some(n) => format!("{n:.0}"),
                None => "–".to_string(),
            },
            None => (index + 1).to_string(),
        }
    }
}
