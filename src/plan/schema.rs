use serde::Serialize;

use super::Summary;

/// Summary keys that may carry the headline efficiency gap, in priority order.
pub const SUMMARY_NAMES: [&str; 4] = [
    "US House Efficiency Gap",
    "Efficiency Gap",
    "SLDL Efficiency Gap",
    "SLDU Efficiency Gap",
];

/// Generation of scoring output a plan was produced by.
///
/// Decoded once from the summary key set; every display decision that depends
/// on the scoring model version matches on this instead of probing keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSchema {
    /// Simulation-based scores with per-scenario positives or standard deviations.
    Simulated,
    /// Early US House scores with legacy census and vote columns.
    UsHouse,
    /// The original blue/red vote prototype.
    RedBlue,
    /// Nothing recognizable yet, usually a plan still being scored.
    Unscored,
}

impl ScoreSchema {
    pub fn detect(summary: &Summary) -> Self {
        if summary.number("Efficiency Gap Positives").is_some() || summary.number("Efficiency Gap SD").is_some() {
            ScoreSchema::Simulated
        } else if summary.number("US House Efficiency Gap").is_some() {
            ScoreSchema::UsHouse
        } else if summary.number("Efficiency Gap").is_some() {
            ScoreSchema::RedBlue
        } else {
            ScoreSchema::Unscored
        }
    }

    pub fn is_scored(self) -> bool { self != ScoreSchema::Unscored }
}

/// First numeric summary key among [`SUMMARY_NAMES`].
pub fn primary_metric(summary: &Summary) -> Option<&'static str> {
    SUMMARY_NAMES.into_iter().find(|name| summary.number(name).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(value: serde_json::Value) -> Summary {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn detection_follows_priority() {
        assert_eq!(ScoreSchema::detect(&summary(json!({"Efficiency Gap": 0.1, "Efficiency Gap SD": 0.02}))), ScoreSchema::Simulated);
        assert_eq!(ScoreSchema::detect(&summary(json!({"Efficiency Gap": 0.1, "US House Efficiency Gap": 0.1}))), ScoreSchema::UsHouse);
        assert_eq!(ScoreSchema::detect(&summary(json!({"Efficiency Gap": -0.3}))), ScoreSchema::RedBlue);
        assert_eq!(ScoreSchema::detect(&summary(json!({"Efficiency Gap": null}))), ScoreSchema::Unscored);
    }

    #[test]
    fn primary_metric_is_first_numeric_name() {
        assert_eq!(primary_metric(&summary(json!({"SLDU Efficiency Gap": 0.1, "Efficiency Gap": 0.2}))), Some("Efficiency Gap"));
        assert_eq!(primary_metric(&summary(json!({"US House Efficiency Gap": "x", "SLDL Efficiency Gap": 0.0}))), Some("SLDL Efficiency Gap"));
        assert_eq!(primary_metric(&summary(json!({}))), None);
    }
}
