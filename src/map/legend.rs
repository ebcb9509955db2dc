use serde::Serialize;

use crate::display::DistrictColor;
use crate::plan::Plan;

/// One swatch of the plan map legend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    /// CSS class of the swatch.
    pub class: &'static str,
    pub color: DistrictColor,
}

const DEMOCRATIC: LegendEntry = LegendEntry { label: "Democratic", class: "swatch-democrat", color: DistrictColor::Democratic };
const REPUBLICAN: LegendEntry = LegendEntry { label: "Republican", class: "swatch-republican", color: DistrictColor::Republican };
const LEANS_DEMOCRATIC: LegendEntry = LegendEntry { label: "Leans Dem.", class: "swatch-lean-democrat", color: DistrictColor::LeanDemocratic };
const LEANS_REPUBLICAN: LegendEntry = LegendEntry { label: "Leans Rep.", class: "swatch-lean-republican", color: DistrictColor::LeanRepublican };
const UNCERTAIN: LegendEntry = LegendEntry { label: "Uncertain", class: "swatch-both", color: DistrictColor::Unknown };

/// Legend swatches: leaning seats are shown only when districts carry win probabilities.
pub fn map_legend(plan: &Plan) -> Vec<LegendEntry> {
    if plan.has_win_probabilities() {
        vec![DEMOCRATIC, REPUBLICAN, LEANS_DEMOCRATIC, LEANS_REPUBLICAN]
    } else {
        vec![DEMOCRATIC, REPUBLICAN, UNCERTAIN]
    }
}

/// Legend markup placed under the map.
pub fn legend_html(entries: &[LegendEntry]) -> String {
    let mut html = String::from(r#"<div class="legend">"#);
    for entry in entries {
        html.push_str(&format!(
            r#"<div class="legend-row"><span class="swatch {}"></span>{}</div>"#,
            entry.class, entry.label,
        ));
    }
    html.push_str("</div>");
    html
}
