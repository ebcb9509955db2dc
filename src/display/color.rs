use serde::Serialize;

use super::columns::{DEMOCRATIC_VOTES, DEMOCRATIC_WINS, REPUBLICAN_VOTES};
use crate::plan::{Chamber, District, Plan, ScoreSchema};

/// Display class of a district on maps, tables and the seat-share strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictColor {
    Democratic,
    Republican,
    LeanDemocratic,
    LeanRepublican,
    Blueish,
    Reddish,
    Unknown,
    Neutral,
}

impl DistrictColor {
    pub const fn hex(self) -> &'static str {
        match self {
            DistrictColor::Democratic => "#4D90D1",
            DistrictColor::Republican => "#D45557",
            DistrictColor::LeanDemocratic => "#6D8AB1",
            DistrictColor::LeanRepublican => "#B56E6B",
            DistrictColor::Blueish => "#6D8AB0",
            DistrictColor::Reddish => "#B56E6A",
            DistrictColor::Unknown => "#838383",
            DistrictColor::Neutral => "#808080",
        }
    }

    /// Lean colors mark a meaningful chance the seat flips during the decade.
    pub fn is_lean(self) -> bool {
        matches!(self, DistrictColor::LeanDemocratic | DistrictColor::LeanRepublican)
    }

    /// Colors drawn with a hatch pattern instead of a flat fill.
    pub fn is_patterned(self) -> bool {
        self.pattern_id().is_some()
    }

    /// SVG pattern element id for patterned colors.
    pub fn pattern_id(self) -> Option<&'static str> {
        match self {
            DistrictColor::LeanDemocratic => Some("lean-blue-pattern"),
            DistrictColor::LeanRepublican => Some("lean-red-pattern"),
            DistrictColor::Blueish => Some("blueish-pattern"),
            DistrictColor::Reddish => Some("reddish-pattern"),
            DistrictColor::Unknown => Some("unknown-pattern"),
            _ => None,
        }
    }

    pub const PATTERNED: [DistrictColor; 5] = [
        DistrictColor::Unknown, DistrictColor::Reddish, DistrictColor::Blueish,
        DistrictColor::LeanDemocratic, DistrictColor::LeanRepublican,
    ];
}

/// Pick a district's color from whichever fields its scoring model produced.
pub fn which_district_color(district: &District, plan: &Plan) -> DistrictColor {
    if let Some(wins) = district.total(DEMOCRATIC_WINS) {
        return win_probability_color(wins, plan.chamber());
    }

    match plan.schema() {
        ScoreSchema::Simulated => simulated_color(district),
        ScoreSchema::UsHouse => vote_color(district, "US House Dem Votes", "US House Rep Votes"),
        ScoreSchema::RedBlue => vote_color(district, "Blue Votes", "Red Votes"),
        ScoreSchema::Unscored => DistrictColor::Neutral,
    }
}

/// State senate seats face fewer elections per decade, so their safe cutoffs are lower.
fn win_probability_color(wins: f64, chamber: Chamber) -> DistrictColor {
    let senate = chamber == Chamber::StateSenate;
    if (senate && wins > 0.79) || wins > 0.87 {
        DistrictColor::Democratic
    } else if (senate && wins < 0.21) || wins < 0.13 {
        DistrictColor::Republican
    } else if wins > 0.5 {
        DistrictColor::LeanDemocratic
    } else if wins < 0.5 {
        DistrictColor::LeanRepublican
    } else {
        DistrictColor::Unknown
    }
}

fn simulated_color(district: &District) -> DistrictColor {
    let (Some(dem), Some(rep), Some(dem_sd), Some(rep_sd)) = (
        district.total(DEMOCRATIC_VOTES),
        district.total(REPUBLICAN_VOTES),
        district.total("Democratic Votes SD"),
        district.total("Republican Votes SD"),
    ) else {
        return DistrictColor::Unknown;
    };

    if dem - 2.0 * dem_sd > rep + 2.0 * rep_sd {
        DistrictColor::Democratic
    } else if dem + 2.0 * dem_sd < rep - 2.0 * rep_sd {
        DistrictColor::Republican
    } else if dem - dem_sd > rep + rep_sd {
        DistrictColor::Blueish
    } else if dem + dem_sd < rep - rep_sd {
        DistrictColor::Reddish
    } else {
        DistrictColor::Unknown
    }
}

fn vote_color(district: &District, dem_field: &str, rep_field: &str) -> DistrictColor {
    match (district.total(dem_field), district.total(rep_field)) {
        (Some(dem), Some(rep)) if dem > rep => DistrictColor::Democratic,
        _ => DistrictColor::Republican,
    }
}
