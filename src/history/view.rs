use std::fmt;

use anyhow::{Context, Result, anyhow, ensure};
use regex::Regex;
use serde::Serialize;

use crate::plan::Chamber;

/// Election years with historical bias data, oldest first.
pub const PLAN_YEARS: [i64; 24] = [
    1972, 1974, 1976, 1978, 1980, 1982, 1984, 1986, 1988, 1990, 1992, 1994,
    1996, 1998, 2000, 2002, 2004, 2006, 2008, 2010, 2012, 2014, 2016, 2018,
];

/// Chambers with a historical bias table.
pub const HISTORY_BOUNDARIES: [Chamber; 3] = [Chamber::UsHouse, Chamber::StateSenate, Chamber::StateHouse];

/// Year and chamber currently shown on the historical map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ViewState {
    pub year: i64,
    pub boundary: Chamber,
}

impl Default for ViewState {
    /// Most recent year, U.S. House.
    fn default() -> Self {
        Self { year: PLAN_YEARS[PLAN_YEARS.len() - 1], boundary: Chamber::UsHouse }
    }
}

impl ViewState {
    pub fn new(year: i64, boundary: Chamber) -> Result<Self> {
        ensure!(PLAN_YEARS.contains(&year), "[history::view] No bias data for year {year}");
        ensure!(HISTORY_BOUNDARIES.contains(&boundary), "[history::view] No bias data for {boundary}");
        Ok(Self { year, boundary })
    }

    /// Parse the `#2016-ushouse` form.
    pub fn from_hash(hash: &str) -> Result<Self> {
        let pattern = Regex::new(r"^#(\d{4})-(\w+)$").context("[history::view] Invalid hash pattern")?;
        let captures = pattern.captures(hash.trim())
            .ok_or_else(|| anyhow!("[history::view] Unrecognized view hash: {hash:?}"))?;

        let year = captures[1].parse::<i64>()
            .with_context(|| format!("[history::view] Invalid year in {hash:?}"))?;
        let boundary = captures[2].parse::<Chamber>()?;
        Self::new(year, boundary)
    }

    pub fn to_hash(&self) -> String {
        format!("#{}-{}", self.year, self.boundary.code())
    }

    /// Bias table file for this view's chamber.
    pub fn csv_name(&self) -> String {
        format!("bias_{}.csv", self.boundary.code())
    }

    #[inline] pub fn with_year(self, year: i64) -> Result<Self> { Self::new(year, self.boundary) }

    #[inline] pub fn with_boundary(self, boundary: Chamber) -> Result<Self> { Self::new(self.year, boundary) }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.year, self.boundary.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_latest_us_house() {
        let view = ViewState::default();
        assert_eq!(view.year, 2018);
        assert_eq!(view.boundary, Chamber::UsHouse);
        assert_eq!(view.csv_name(), "bias_ushouse.csv");
    }

    #[test]
    fn hashes_round_trip() {
        let view = ViewState::from_hash("#2016-statesenate").unwrap();
        assert_eq!(view, ViewState { year: 2016, boundary: Chamber::StateSenate });
        assert_eq!(view.to_hash(), "#2016-statesenate");
        assert_eq!(view.to_string(), "2016 State Senate");
    }

    #[test]
    fn rejects_unknown_views() {
        assert!(ViewState::from_hash("2016-ushouse").is_err());
        assert!(ViewState::from_hash("#2017-ushouse").is_err());
        assert!(ViewState::from_hash("#2016-senate").is_err());
        assert!(ViewState::from_hash("#2016-localplan").is_err());
        assert!(ViewState::default().with_year(1970).is_err());
        assert_eq!(ViewState::default().with_boundary(Chamber::StateHouse).unwrap().csv_name(), "bias_statehouse.csv");
    }
}
