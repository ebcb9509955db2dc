use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Chamber, District, ScoreSchema, Summary, schema};
use crate::common::state_code_to_name;

/// Candidate scenario for a district when incumbency is modelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Incumbency {
    Open,
    Democratic,
    Republican,
    Unknown,
}

impl Incumbency {
    pub fn from_code(code: &str) -> Self {
        match code {
            "O" => Incumbency::Open,
            "D" => Incumbency::Democratic,
            "R" => Incumbency::Republican,
            _ => Incumbency::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Incumbency::Open => "Open Seat",
            Incumbency::Democratic => "Democratic Incumbent",
            Incumbency::Republican => "Republican Incumbent",
            Incumbency::Unknown => "–",
        }
    }
}

/// Scoring model the plan was evaluated with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Model {
    pub state: Option<String>,
    pub house: Option<String>,
    pub incumbency: Option<bool>,
    pub version: Option<String>,
    pub versions: Option<Vec<String>>,
    pub key_prefix: Option<String>,
}

impl Model {
    #[inline] pub fn chamber(&self) -> Option<Chamber> { self.house.as_deref()?.parse().ok() }

    #[inline] pub fn state_name(&self) -> Option<&'static str> { state_code_to_name(self.state.as_deref()?) }

    /// Version offered first on the preread form.
    pub fn preferred_version(&self) -> Option<&str> {
        match &self.versions {
            Some(versions) => versions.first().map(String::as_str),
            None => self.version.as_deref(),
        }
    }
}

/// Links and notes curated for plans in the public library.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryMetadata {
    pub authoritative_link: Option<String>,
    pub predecessor_link: Option<String>,
    pub shapefile_file: Option<String>,
    pub blockassign_file: Option<String>,
    pub notes: Option<String>,
}

/// Wire shape of a scoring document. Every field is optional and loosely
/// typed; [`Plan`] normalizes it once.
#[derive(Deserialize)]
struct PlanDocument {
    #[serde(default)] id: Option<Value>,
    #[serde(default)] summary: Option<Value>,
    #[serde(default)] districts: Option<Value>,
    #[serde(default)] model: Option<Value>,
    #[serde(default)] incumbents: Option<Value>,
    #[serde(default)] geometry_key: Option<Value>,
    #[serde(default)] description: Option<Value>,
    #[serde(default)] start_time: Option<Value>,
    #[serde(default)] status: Option<Value>,
    #[serde(default)] message: Option<Value>,
    #[serde(default)] library_metadata: Option<Value>,
}

/// A scored (or still scoring) districting plan.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "PlanDocument")]
pub struct Plan {
    id: Option<String>,
    summary: Summary,
    districts: Vec<District>,
    district_list: bool,
    model: Option<Model>,
    incumbents: Vec<Incumbency>,
    geometry_key: Option<String>,
    description: Option<String>,
    start_time: Option<f64>,
    status: Option<bool>,
    message: Option<String>,
    library_metadata: Option<LibraryMetadata>,
    schema: ScoreSchema,
}

fn string_value(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parsed<T: serde::de::DeserializeOwned>(value: Option<Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

impl From<PlanDocument> for Plan {
    fn from(doc: PlanDocument) -> Self {
        let summary: Summary = parsed(doc.summary).unwrap_or_default();

        let (districts, district_list) = match doc.districts {
            Some(Value::Array(items)) => {
                let districts = items.into_iter()
                    .map(|item| serde_json::from_value(item).unwrap_or_default())
                    .collect();
                (districts, true)
            }
            _ => (Vec::new(), false),
        };

        let incumbents = match doc.incumbents {
            Some(Value::Array(codes)) => codes.iter()
                .map(|code| code.as_str().map_or(Incumbency::Unknown, Incumbency::from_code))
                .collect(),
            _ => Vec::new(),
        };

        let schema = ScoreSchema::detect(&summary);

        Self {
            id: string_value(doc.id),
            summary,
            districts,
            district_list,
            model: parsed(doc.model),
            incumbents,
            geometry_key: string_value(doc.geometry_key),
            description: string_value(doc.description),
            start_time: doc.start_time.as_ref().and_then(Value::as_f64),
            status: doc.status.as_ref().and_then(Value::as_bool),
            message: string_value(doc.message).filter(|m| !m.is_empty()),
            library_metadata: parsed(doc.library_metadata),
            schema,
        }
    }
}

impl Plan {
    /// Decode a plan from its JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("[plan] Plan document is not a JSON object")
    }

    /// Decode a plan from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).context("[plan] Plan document is not a JSON object")
    }

    #[inline] pub fn id(&self) -> Option<&str> { self.id.as_deref() }

    #[inline] pub fn summary(&self) -> &Summary { &self.summary }

    #[inline] pub fn districts(&self) -> &[District] { &self.districts }

    #[inline] pub fn model(&self) -> Option<&Model> { self.model.as_ref() }

    #[inline] pub fn incumbents(&self) -> &[Incumbency] { &self.incumbents }

    #[inline] pub fn geometry_key(&self) -> Option<&str> { self.geometry_key.as_deref() }

    #[inline] pub fn description(&self) -> Option<&str> { self.description.as_deref() }

    #[inline] pub fn start_time(&self) -> Option<f64> { self.start_time }

    #[inline] pub fn status(&self) -> Option<bool> { self.status }

    #[inline] pub fn message(&self) -> Option<&str> { self.message.as_deref() }

    #[inline] pub fn library_metadata(&self) -> Option<&LibraryMetadata> { self.library_metadata.as_ref() }

    #[inline] pub fn schema(&self) -> ScoreSchema { self.schema }

    /// Summary key holding the headline efficiency gap, if scoring produced one.
    #[inline] pub fn primary_metric(&self) -> Option<&'static str> { schema::primary_metric(&self.summary) }

    /// Number of districts, or `None` when the document has no district list yet.
    pub fn districts_count(&self) -> Option<usize> {
        self.district_list.then_some(self.districts.len())
    }

    /// Chamber from the model, defaulting to the U.S. House.
    pub fn chamber(&self) -> Chamber {
        self.model.as_ref().and_then(Model::chamber).unwrap_or_default()
    }

    /// Scoring has finished when the service says so or a headline metric is present.
    pub fn is_scored(&self) -> bool {
        self.status == Some(true) || self.primary_metric().is_some()
    }

    /// Incumbency is shown only when modelled and aligned with the districts.
    pub fn has_incumbency(&self) -> bool {
        self.model.as_ref().and_then(|m| m.incumbency).unwrap_or(false)
            && !self.incumbents.is_empty()
            && self.incumbents.len() == self.districts.len()
    }

    /// Candidate scenario label for the district at `index`, when incumbency is shown.
    pub fn incumbency_label(&self, index: usize) -> Option<&'static str> {
        if !self.has_incumbency() { return None }
        self.incumbents.get(index).map(|i| i.label())
    }

    /// Whether districts carry win probabilities (`Democratic Wins`).
    pub fn has_win_probabilities(&self) -> bool {
        self.districts.first().is_some_and(|d| d.total("Democratic Wins").is_some())
    }

    /// Older uploads stored geometry without recording its key.
    pub fn with_derived_geometry_key(mut self) -> Self {
        if self.geometry_key.is_none() {
            if let Some(id) = &self.id {
                tracing::debug!(id = %id, "deriving geometry key from plan id");
                self.geometry_key = Some(format!("uploads/{id}/geometry.json"));
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_documents_decode() {
        let plan = Plan::from_value(json!({"districts": "no", "summary": null, "model": 5})).unwrap();
        assert!(plan.districts().is_empty());
        assert_eq!(plan.districts_count(), None);
        assert_eq!(plan.schema(), ScoreSchema::Unscored);
        assert!(plan.model().is_none());
        assert!(!plan.is_scored());
        assert_eq!(plan.chamber(), Chamber::UsHouse);
    }

    #[test]
    fn incumbency_requires_model_and_alignment() {
        let mut doc = json!({
            "model": {"state": "NC", "house": "statesenate", "incumbency": true},
            "districts": [{"totals": {}}, {"totals": {}}],
            "incumbents": ["O", "D"],
        });
        let plan = Plan::from_value(doc.clone()).unwrap();
        assert!(plan.has_incumbency());
        assert_eq!(plan.incumbency_label(1), Some("Democratic Incumbent"));
        assert_eq!(plan.chamber(), Chamber::StateSenate);
        assert_eq!(plan.model().unwrap().state_name(), Some("North Carolina"));

        doc["incumbents"] = json!(["O"]);
        assert!(!Plan::from_value(doc.clone()).unwrap().has_incumbency());

        doc["incumbents"] = json!(["O", "R"]);
        doc["model"]["incumbency"] = json!(false);
        assert_eq!(Plan::from_value(doc).unwrap().incumbency_label(0), None);
    }

    #[test]
    fn geometry_key_derived_from_id() {
        let plan = Plan::from_value(json!({"id": "abc"})).unwrap().with_derived_geometry_key();
        assert_eq!(plan.geometry_key(), Some("uploads/abc/geometry.json"));

        let plan = Plan::from_value(json!({"id": "abc", "geometry_key": "x.json"})).unwrap().with_derived_geometry_key();
        assert_eq!(plan.geometry_key(), Some("x.json"));
    }

    #[test]
    fn preferred_version() {
        let model: Model = serde_json::from_value(json!({"version": "2017", "versions": ["2020B", "2017"]})).unwrap();
        assert_eq!(model.preferred_version(), Some("2020B"));
        let model: Model = serde_json::from_value(json!({"version": "2017"})).unwrap();
        assert_eq!(model.preferred_version(), Some("2017"));
    }
}
