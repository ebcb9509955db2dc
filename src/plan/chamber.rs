use std::{fmt, str::FromStr};

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Legislative body a plan draws districts for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    #[default]
    UsHouse,
    StateSenate,
    StateHouse,
    LocalPlan,
}

impl Chamber {
    pub const ALL: [Chamber; 4] = [Chamber::UsHouse, Chamber::StateSenate, Chamber::StateHouse, Chamber::LocalPlan];

    /// Short code used in model documents, CSV file names and view hashes.
    pub fn code(self) -> &'static str {
        match self {
            Chamber::UsHouse => "ushouse",
            Chamber::StateSenate => "statesenate",
            Chamber::StateHouse => "statehouse",
            Chamber::LocalPlan => "localplan",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Chamber::UsHouse => "U.S. House",
            Chamber::StateSenate => "State Senate",
            Chamber::StateHouse => "State House",
            Chamber::LocalPlan => "Local Plan",
        }
    }

    /// Wording used in the preread sentence ("... local plan uploaded ...").
    pub(crate) fn preread_name(self) -> &'static str {
        match self {
            Chamber::LocalPlan => "local",
            other => other.display_name(),
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Chamber {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ushouse" => Ok(Chamber::UsHouse),
            "statesenate" => Ok(Chamber::StateSenate),
            "statehouse" => Ok(Chamber::StateHouse),
            "localplan" => Ok(Chamber::LocalPlan),
            other => bail!("[plan::chamber] Unknown chamber code: {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_str() {
        for chamber in Chamber::ALL {
            assert_eq!(chamber.code().parse::<Chamber>().unwrap(), chamber);
        }
        assert!("senate".parse::<Chamber>().is_err());
    }

    #[test]
    fn display_names() {
        assert_eq!(Chamber::UsHouse.display_name(), "U.S. House");
        assert_eq!(Chamber::LocalPlan.display_name(), "Local Plan");
        assert_eq!(Chamber::LocalPlan.preread_name(), "local");
    }
}
