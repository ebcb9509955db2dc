use serde::Serialize;

use crate::display::{DistrictColor, which_district_color};
use crate::plan::Plan;

/// Outline width of every district shape.
pub const DISTRICT_WEIGHT: f64 = 2.0;

/// Fill opacity of every district shape.
pub const DISTRICT_FILL_OPACITY: f64 = 0.5;

/// Rendering style of one district feature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureStyle {
    pub color: DistrictColor,
    pub weight: f64,
    pub fill_opacity: f64,
}

impl FeatureStyle {
    /// SVG fill: a pattern reference for hatched colors, else the flat hex.
    pub fn fill(&self) -> String {
        match self.color.pattern_id() {
            Some(id) => format!("url(#{id})"),
            None => self.color.hex().to_string(),
        }
    }
}

/// Style for the district at `index`; features past the district list get neutral gray.
pub fn district_style(plan: &Plan, index: usize) -> FeatureStyle {
    let color = plan.districts().get(index)
        .map(|district| which_district_color(district, plan))
        .unwrap_or(DistrictColor::Neutral);

    FeatureStyle { color, weight: DISTRICT_WEIGHT, fill_opacity: DISTRICT_FILL_OPACITY }
}

/// Popup body: `District N`, plus the incumbency scenario when modelled.
pub fn popup_text(plan: &Plan, index: usize) -> String {
    let mut text = format!("District {}", index + 1);
    if let Some(label) = plan.incumbency_label(index) {
        text.push_str("<br>");
        text.push_str(label);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn styles_follow_district_color() {
        let plan = Plan::from_value(json!({
            "summary": {"Efficiency Gap": 0.1},
            "districts": [
                {"totals": {"Democratic Wins": 0.95}},
                {"totals": {"Democratic Wins": 0.6}}
            ]
        })).unwrap();

        let strong = district_style(&plan, 0);
        assert_eq!(strong.color, DistrictColor::Democratic);
        assert_eq!(strong.fill(), "#4D90D1");
        assert_eq!(strong.weight, 2.0);
        assert_eq!(strong.fill_opacity, 0.5);

        let lean = district_style(&plan, 1);
        assert_eq!(lean.fill(), "url(#lean-blue-pattern)");

        assert_eq!(district_style(&plan, 9).color, DistrictColor::Neutral);
    }

    #[test]
    fn popups_include_incumbency() {
        let plan = Plan::from_value(json!({
            "model": {"incumbency": true},
            "incumbents": ["O", "D"],
            "districts": [{"totals": {}}, {"totals": {}}]
        })).unwrap();
        assert_eq!(popup_text(&plan, 0), "District 1<br>Open Seat");
        assert_eq!(popup_text(&plan, 1), "District 2<br>Democratic Incumbent");

        let bare = Plan::from_value(json!({"districts": [{"totals": {}}]})).unwrap();
        assert_eq!(popup_text(&bare, 0), "District 1");
    }
}
