//! Historical state bias map: choropleth classes, legend and per-state analysis.

use serde::Serialize;

use super::ViewState;
use crate::common::STATES;
use crate::io::csv::BiasRecord;

/// Below this absolute efficiency gap a plan counts as balanced.
pub const BALANCED_THRESHOLD: f64 = 0.02;

/// One color class of the state map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChoroplethBreak {
    pub from: f64,
    pub to: f64,
    pub color: &'static str,
    pub title: &'static str,
}

const fn class(from: f64, to: f64, color: &'static str, title: &'static str) -> ChoroplethBreak {
    ChoroplethBreak { from, to, color, title }
}

/// Color classes, "No Data" first.
pub static CHOROPLETH_BREAKS: [ChoroplethBreak; 10] = [
    class(f64::NEG_INFINITY, -100.0, "#FFFFFF", "No Data"),
    class(-100.0, -0.20, "#C71C36", "Most Biased Toward Republican"),
    class(-0.20, -0.10, "#D95F72", "More Biased Toward Republican"),
    class(-0.10, -0.05, "#E8A2AD", "Somewhat Biased Toward Republican"),
    class(-0.05, -0.02, "#F5D7DC", "Slightly Biased Toward Republican"),
    class(-0.02, 0.02, "#F2E5FA", "Balanced"),
    class(0.02, 0.05, "#D7E4F5", "Slightly Biased Toward Democrat"),
    class(0.05, 0.10, "#99B7DE", "Somewhat Biased Toward Democrat"),
    class(0.10, 0.20, "#4C7FC2", "More Biased Toward Democrat"),
    class(0.20, 100.0, "#0049A8", "Most Biased Toward Democrat"),
];

/// Class of a bias value. A value on a boundary belongs to the class above it.
pub fn classify(value: Option<f64>) -> &'static ChoroplethBreak {
    let no_data = &CHOROPLETH_BREAKS[0];
    let Some(value) = value.filter(|v| v.is_finite()) else { return no_data };

    CHOROPLETH_BREAKS[1..].iter().rev()
        .find(|class| class.from <= value && value <= class.to)
        .unwrap_or(no_data)
}

/// Legend order: Republican to Democratic, then "No Data".
pub fn legend_breaks() -> Vec<&'static ChoroplethBreak> {
    CHOROPLETH_BREAKS[1..].iter().chain(&CHOROPLETH_BREAKS[..1]).collect()
}

pub fn legend_html() -> String {
    let breaks = legend_breaks();
    let mut html = String::from(concat!(
        r#"<div class="legend">"#,
        "<h1>Most biased plan in our data</h1>",
        "<h2>(based on efficiency gap)</h2>",
    ));
    for (i, class) in breaks.iter().enumerate() {
        let label = if i == 0 { "<span>R</span>" } else if i == breaks.len() - 2 { "<span>D</span>" } else { "" };
        html.push_str(&format!(
            r#"<div class="slice" style="background-color: {}" title="{}">{label}</div>"#,
            class.color, class.title,
        ));
    }
    html.push_str("<h5>No Data</h5></div>");
    html
}

/// A state's bias for the selected view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateBias {
    pub code: &'static str,
    pub name: &'static str,
    pub value: Option<f64>,
}

impl StateBias {
    pub fn class(&self) -> &'static ChoroplethBreak { classify(self.value) }

    /// Hover text on the map.
    pub fn tooltip(&self) -> String {
        match self.value {
            None => format!("{}: No data", self.name),
            Some(_) => format!("{}: Click for details", self.name),
        }
    }

    /// Popup analysis (HTML).
    pub fn analysis(&self) -> String {
        let Some(value) = self.value else { return "No data available.".to_string() };
        if value.abs() <= BALANCED_THRESHOLD {
            return "This plan shows no statistically significant skew toward either party.".to_string();
        }

        let percentile = 50 + (value.abs() * 100.0).round() as i64;
        let party = if value < 0.0 { "Republican" } else { "Democrat" };
        format!(
            "This plan is more biased than <b>{percentile}%</b> of plans analyzed.<br/>This plan is biased in favor of <b>{party}</b> voters."
        )
    }

    /// State name mangled for URLs, e.g. `south_carolina`.
    pub fn slug(&self) -> String {
        self.name.to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect()
    }

    /// Relative link to the state's page.
    pub fn more_info_url(&self) -> String {
        format!("../{}/", self.slug())
    }
}

/// Every state, with the view year's bias where the table has one.
pub fn state_biases(records: &[BiasRecord], view: &ViewState) -> Vec<StateBias> {
    let mut states = STATES.iter()
        .map(|&(code, name)| StateBias { code, name, value: None })
        .collect::<Vec<_>>();

    for record in records.iter().filter(|r| r.year == view.year) {
        match states.iter_mut().find(|s| s.code == record.state) {
            Some(state) => state.value = record.bias,
            None => tracing::debug!(state = %record.state, "skipping bias row for unknown state"),
        }
    }

    tracing::debug!(view = %view, with_data = states.iter().filter(|s| s.value.is_some()).count(), "state biases");
    states
}

/// Look up one state (postal code, case-insensitive).
pub fn find_state<'a>(states: &'a [StateBias], code: &str) -> Option<&'a StateBias> {
    states.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv::read_bias_csv_str;

    #[test]
    fn classes() {
        assert_eq!(classify(None).title, "No Data");
        assert_eq!(classify(Some(f64::NAN)).title, "No Data");
        assert_eq!(classify(Some(0.0)).title, "Balanced");
        assert_eq!(classify(Some(-0.02)).title, "Balanced");
        assert_eq!(classify(Some(0.02)).title, "Slightly Biased Toward Democrat");
        assert_eq!(classify(Some(-0.15)).title, "More Biased Toward Republican");
        assert_eq!(classify(Some(0.35)).color, "#0049A8");
    }

    #[test]
    fn legend_puts_no_data_last() {
        let breaks = legend_breaks();
        assert_eq!(breaks.len(), 10);
        assert_eq!(breaks[0].title, "Most Biased Toward Republican");
        assert_eq!(breaks[9].title, "No Data");

        let html = legend_html();
        assert!(html.contains("<span>R</span>"));
        assert!(html.ends_with("<h5>No Data</h5></div>"));
    }

    #[test]
    fn analyses() {
        let state = |value| StateBias { code: "SC", name: "South Carolina", value };
        assert_eq!(state(None).analysis(), "No data available.");
        assert!(state(Some(0.01)).analysis().contains("no statistically significant skew"));
        let r = state(Some(-0.12)).analysis();
        assert!(r.contains("<b>62%</b>"));
        assert!(r.contains("<b>Republican</b>"));
        assert!(state(Some(0.05)).analysis().contains("<b>Democrat</b>"));
        assert_eq!(state(None).slug(), "south_carolina");
        assert_eq!(state(None).more_info_url(), "../south_carolina/");
        assert_eq!(state(None).tooltip(), "South Carolina: No data");
    }

    #[test]
    fn biases_follow_the_view_year() {
        let records = read_bias_csv_str("state,year,bias\nNC,2016,-0.19\nNC,2018,-0.12\nwi,2018,0.03\nZZ,2018,0.5\n").unwrap();
        let states = state_biases(&records, &ViewState::default());
        assert_eq!(states.len(), 50);
        assert_eq!(find_state(&states, "nc").unwrap().value, Some(-0.12));
        assert_eq!(find_state(&states, "WI").unwrap().value, Some(0.03));
        assert_eq!(find_state(&states, "AL").unwrap().value, None);
    }
}
