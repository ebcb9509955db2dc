use std::{fmt, str::FromStr};

use anyhow::bail;
use serde::Serialize;

use super::gradient::{GRADIENT_STEPS, bias_gradient};
use crate::plan::Chamber;

/// Expected score spread mapped onto the full gradient when none is given.
pub const DEFAULT_SPREAD: f64 = 0.25;

/// Fairness metric a score belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    /// Efficiency gap.
    Eg,
    /// Partisan bias.
    Pb,
    /// Mean-median difference.
    Mm,
    /// Declination.
    D2,
    /// Historical bias shown on the state map.
    Overall,
}

impl MetricKey {
    /// Scores at or below this magnitude are not statistically meaningful.
    pub fn balanced_threshold(self) -> f64 {
        match self {
            MetricKey::Eg | MetricKey::Pb | MetricKey::D2 => 0.04,
            MetricKey::Mm | MetricKey::Overall => 0.02,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            MetricKey::Eg => "eg",
            MetricKey::Pb => "pb",
            MetricKey::Mm => "mm",
            MetricKey::D2 => "d2",
            MetricKey::Overall => "overall",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.code()) }
}

impl FromStr for MetricKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "eg" => MetricKey::Eg,
            "pb" => MetricKey::Pb,
            "mm" => MetricKey::Mm,
            "d2" => MetricKey::D2,
            "overall" => MetricKey::Overall,
            other => bail!("[bias::lookup] Unknown metric key: {other:?}"),
        })
    }
}

/// How scores are mapped onto the color gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiasScale {
    /// Score magnitude that reaches either end of the gradient.
    pub spread: f64,
    /// Number of gradient stops (100 normally, 30 for compact legends).
    pub steps: usize,
}

impl Default for BiasScale {
    fn default() -> Self { Self { spread: DEFAULT_SPREAD, steps: GRADIENT_STEPS } }
}

impl BiasScale {
    /// Scale matching the bell-curve chart for this chamber and metric.
    pub fn for_chart(chamber: Chamber, metric: MetricKey) -> Self {
        Self { spread: bellcurve_spread(chamber, metric).unwrap_or(DEFAULT_SPREAD), ..Self::default() }
    }
}

/// Min-to-max spread drawn by each chamber's bell-curve chart.
pub fn bellcurve_spread(chamber: Chamber, metric: MetricKey) -> Option<f64> {
    let spread = match (chamber, metric) {
        (Chamber::StateHouse, MetricKey::Eg) => 0.175,
        (Chamber::StateHouse, MetricKey::Mm) => 0.09,
        (Chamber::StateHouse, MetricKey::Pb) => 0.18,
        (Chamber::UsHouse, MetricKey::Eg) => 0.25,
        (Chamber::UsHouse, MetricKey::Mm) => 0.12,
        (Chamber::UsHouse, MetricKey::Pb) => 0.25,
        (Chamber::StateSenate, MetricKey::Eg) => 0.22,
        (Chamber::StateSenate, MetricKey::Mm) => 0.13,
        (Chamber::StateSenate, MetricKey::Pb) => 0.19,
        _ => return None,
    };
    Some(spread)
}

/// Qualitative reading of a bias score.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BiasLookup {
    /// `Democrat`, `Republican`, or empty when balanced.
    pub party: &'static str,
    /// `d`, `r`, or empty.
    pub party_code: &'static str,
    pub color: String,
    pub description: String,
    /// 0 (balanced) to 3 (most extreme).
    pub extremity: u8,
}

impl BiasLookup {
    fn no_data() -> Self {
        Self {
            party: "",
            party_code: "",
            color: "#ffffff".to_string(),
            description: "No Data".to_string(),
            extremity: 0,
        }
    }

    pub fn is_no_data(&self) -> bool { self.description == "No Data" }
}

/// Describe `score` with the default scale.
pub fn lookup_bias(score: Option<f64>, metric: MetricKey) -> BiasLookup {
    lookup_bias_with(score, metric, &BiasScale::default())
}

pub fn lookup_bias_with(score: Option<f64>, metric: MetricKey, scale: &BiasScale) -> BiasLookup {
    let Some(score) = score.filter(|s| s.is_finite()) else { return BiasLookup::no_data() };

    let threshold = metric.balanced_threshold();
    let magnitude = score.abs();

    let party = match (magnitude > threshold, score > 0.0) {
        (false, _) => "",
        (true, true) => "Democrat",
        (true, false) => "Republican",
    };
    let party_code = match party {
        "Democrat" => "d",
        "Republican" => "r",
        _ => "",
    };

    let description = if magnitude >= 0.20 {
        format!("Most Biased In Favor of {party}")
    } else if magnitude >= 0.14 {
        format!("More Biased In Favor of {party}")
    } else if magnitude >= 0.07 {
        format!("Biased In Favor of {party}")
    } else if magnitude > threshold {
        format!("Slightly Biased In Favor of {party}")
    } else {
        "No Significant Bias".to_string()
    };

    let extremity = if magnitude >= 0.14 {
        3
    } else if magnitude >= 0.07 {
        2
    } else if magnitude > threshold {
        1
    } else {
        0
    };

    let colors = bias_gradient(scale.steps);
    let color = if colors.is_empty() {
        String::new()
    } else {
        let spread = if scale.spread > 0.0 { scale.spread } else { DEFAULT_SPREAD };
        let p = (0.5 + 0.5 * score / spread).clamp(0.0, 1.0);
        colors[((colors.len() - 1) as f64 * p).round() as usize].clone()
    };

    BiasLookup { party, party_code, color, description, extremity }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_is_balanced() {
        for metric in [MetricKey::Eg, MetricKey::Pb, MetricKey::Mm, MetricKey::D2, MetricKey::Overall] {
            let lookup = lookup_bias(Some(-metric.balanced_threshold()), metric);
            assert_eq!(lookup.party, "");
            assert_eq!(lookup.description, "No Significant Bias");
            assert_eq!(lookup.extremity, 0);
        }
        assert_eq!(lookup_bias(Some(0.03), MetricKey::Mm).party, "Democrat");
        assert_eq!(lookup_bias(Some(0.03), MetricKey::Eg).party, "");
    }

    #[test]
    fn tiers_pick_the_highest_match() {
        let most = lookup_bias(Some(-0.25), MetricKey::Eg);
        assert_eq!(most.description, "Most Biased In Favor of Republican");
        assert_eq!(most.party_code, "r");
        assert_eq!(most.extremity, 3);

        assert_eq!(lookup_bias(Some(0.15), MetricKey::Eg).description, "More Biased In Favor of Democrat");
        assert_eq!(lookup_bias(Some(0.08), MetricKey::Eg).extremity, 2);
        assert_eq!(lookup_bias(Some(0.05), MetricKey::Eg).description, "Slightly Biased In Favor of Democrat");
    }

    #[test]
    fn colors_clamp_to_the_gradient_ends() {
        assert_eq!(lookup_bias(Some(-5.0), MetricKey::Eg).color, "#c71c36");
        assert_eq!(lookup_bias(Some(5.0), MetricKey::Eg).color, "#0049a8");
        let compact = BiasScale { steps: 30, ..BiasScale::default() };
        assert_eq!(lookup_bias_with(Some(1e9), MetricKey::Pb, &compact).color, "#0049a8");
    }

    #[test]
    fn missing_scores_are_no_data() {
        let lookup = lookup_bias(None, MetricKey::Eg);
        assert!(lookup.is_no_data());
        assert_eq!(lookup.color, "#ffffff");
        assert!(lookup_bias(Some(f64::NAN), MetricKey::Eg).is_no_data());
    }

    #[test]
    fn chart_spreads() {
        assert_eq!(bellcurve_spread(Chamber::StateHouse, MetricKey::Eg), Some(0.175));
        assert_eq!(bellcurve_spread(Chamber::StateSenate, MetricKey::Mm), Some(0.13));
        assert_eq!(bellcurve_spread(Chamber::LocalPlan, MetricKey::Eg), None);
        assert_eq!(BiasScale::for_chart(Chamber::LocalPlan, MetricKey::D2).spread, DEFAULT_SPREAD);
    }
}
