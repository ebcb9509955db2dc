use serde::Serialize;

use super::format::{nice_percent, partisan_suffix};
use crate::plan::Plan;

/// Vote swings plotted by the sensitivity chart, most Democratic first.
pub const SWING_CATEGORIES: [&str; 11] = [
    "+5 D", "+4 D", "+3 D", "+2 D", "+1 D", "0", "+1 R", "+2 R", "+3 R", "+4 R", "+5 R",
];

const SWING_KEYS: [&str; 11] = [
    "Efficiency Gap +5 Dem",
    "Efficiency Gap +4 Dem",
    "Efficiency Gap +3 Dem",
    "Efficiency Gap +2 Dem",
    "Efficiency Gap +1 Dem",
    "Efficiency Gap",
    "Efficiency Gap +1 Rep",
    "Efficiency Gap +2 Rep",
    "Efficiency Gap +3 Rep",
    "Efficiency Gap +4 Rep",
    "Efficiency Gap +5 Rep",
];

/// Expected efficiency gap, in percent, under each vote swing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sensitivity {
    pub categories: [&'static str; 11],
    pub values: Vec<Option<f64>>,
}

/// Sensitivity series, or `None` when the plan has none of the swing scores.
pub fn sensitivity(plan: &Plan) -> Option<Sensitivity> {
    let values: Vec<Option<f64>> = SWING_KEYS.iter()
        .map(|key| plan.summary().number(key).map(|v| 100.0 * v))
        .collect();
    let swung = values.iter().enumerate().any(|(i, v)| i != 5 && v.is_some());
    swung.then_some(Sensitivity { categories: SWING_CATEGORIES, values })
}

/// Y axis label: `3% D`, `2% R`, `0% `.
pub fn swing_axis_label(value: f64) -> String {
    let side = if value == 0.0 { "" } else if value < 0.0 { "R" } else { "D" };
    format!("{}% {side}", value.abs())
}

impl Sensitivity {
    /// One `category: value` line per swing.
    pub fn to_text(&self) -> String {
        self.categories.iter().zip(&self.values)
            .map(|(category, value)| match value {
                Some(v) => format!("{category:>5}  {}\n", swing_axis_label((v * 10.0).round() / 10.0)),
                None => format!("{category:>5}  –\n"),
            })
            .collect()
    }
}

/// Statewide race re-scored with the plan's districts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FtvaRace {
    pub office: &'static str,
    pub year: &'static str,
    pub gap: f64,
}

const FTVA_OPTIONAL: [(&str, &str, &str); 4] = [
    ("U.S. President", "2016", "US President 2016 Efficiency Gap"),
    ("U.S. Senate", "2020", "US Senate 2020 Efficiency Gap"),
    ("U.S. Senate", "2018", "US Senate 2018 Efficiency Gap"),
    ("U.S. Senate", "2016", "US Senate 2016 Efficiency Gap"),
];

/// Races in display order; empty unless the 2020 presidential race was scored.
pub fn ftva_races(plan: &Plan) -> Vec<FtvaRace> {
    let summary = plan.summary();
    let Some(gap) = summary.number("US President 2020 Efficiency Gap") else { return Vec::new() };

    let mut races = vec![FtvaRace { office: "U.S. President", year: "2020", gap }];
    races.extend(FTVA_OPTIONAL.iter().filter_map(|&(office, year, key)| {
        summary.number(key).map(|gap| FtvaRace { office, year, gap })
    }));
    races
}

impl FtvaRace {
    pub fn amount(&self) -> String {
        format!("{}{}", nice_percent(self.gap.abs()), partisan_suffix(self.gap))
    }

    pub fn heading(&self) -> String {
        format!("{} {}: {}", self.office, self.year, self.amount())
    }

    pub fn text(&self) -> String {
        let (win_party, lose_party) = if self.gap < 0.0 { ("Republican", "Democratic") } else { ("Democratic", "Republican") };
        format!(
            "Under this plan, votes for the {win_party} candidate were inefficient at a rate {} lower than votes for the {lose_party} candidate.",
            self.amount(),
        )
    }

    pub fn to_html(&self) -> String {
        format!("<h5>{}</h5><p>{}</p>", self.heading(), self.text())
    }
}
