use crate::plan::{Plan, ScoreSchema};

/// Candidate district fields for simulation-scored plans, in display order.
pub const FIELDS: &[&str] = &[
    "Population 2010",
    "Population 2015",
    "Population 2016",
    "Population 2018",
    "Population 2019",
    "Population 2020 ACS",
    "Population 2020",
    "Black Population 2015",
    "Hispanic Population 2015",
    "Black Population 2016",
    "Hispanic Population 2016",
    "Black Population 2018",
    "Hispanic Population 2018",
    "Black Population 2019",
    "Hispanic Population 2019",
    "Asian Population 2019",
    "Black Population 2020 ACS",
    "Hispanic Population 2020 ACS",
    "Asian Population 2020 ACS",
    "Black Population 2020",
    "Hispanic Population 2020",
    "Asian Population 2020",
    "Black Citizen Voting-Age Population 2015",
    "Hispanic Citizen Voting-Age Population 2015",
    "Black Citizen Voting-Age Population 2018",
    "Hispanic Citizen Voting-Age Population 2018",
    "Citizen Voting-Age Population 2019",
    "Hispanic Citizen Voting-Age Population 2019",
    "Black Citizen Voting-Age Population 2019",
    "Asian Citizen Voting-Age Population 2019",
    "American Indian or Alaska Native Citizen Voting-Age Population 2019",
    "Citizen Voting-Age Population 2020 ACS",
    "Hispanic Citizen Voting-Age Population 2020 ACS",
    "Black Citizen Voting-Age Population 2020 ACS",
    "Asian Citizen Voting-Age Population 2020 ACS",
    "American Indian or Alaska Native Citizen Voting-Age Population 2020 ACS",
    "Democratic Wins",
    "Democratic Votes",
    "Republican Votes",
    "US President 2024 - DEM",
    "US President 2024 - REP",
    "US President 2020 - DEM",
    "US President 2020 - REP",
    "US President 2016 - DEM",
    "US President 2016 - REP",
];

/// Columns of the early US House scoring model.
pub const US_HOUSE_FIELDS: &[&str] = &[
    "Population", "Voting-Age Population", "Black Voting-Age Population",
    "US House Dem Votes", "US House Rep Votes",
];

/// Columns of the red/blue prototype.
pub const RED_BLUE_FIELDS: &[&str] = &["Voters", "Blue Votes", "Red Votes"];

pub const DEMOCRATIC_WINS: &str = "Democratic Wins";
pub const DEMOCRATIC_VOTES: &str = "Democratic Votes";
pub const REPUBLICAN_VOTES: &str = "Republican Votes";

/// Vote fields and their column titles.
pub const VOTE_FIELD_TITLES: &[(&str, &str)] = &[
    ("Democratic Votes", "Democratic Votes"),
    ("Republican Votes", "Republican Votes"),
    ("US President 2016 - DEM", "Clinton (D) 2016"),
    ("US President 2016 - REP", "Trump (R) 2016"),
    ("US President 2020 - DEM", "Biden (D) 2020"),
    ("US President 2020 - REP", "Trump (R) 2020"),
    ("US President 2024 - DEM", "Harris (D) 2024"),
    ("US President 2024 - REP", "Trump (R) 2024"),
    ("US Senate 2016 - DEM", "U.S.&nbsp;Sen. Dem. 2016"),
    ("US Senate 2016 - REP", "U.S.&nbsp;Sen. Rep. 2016"),
    ("US Senate 2018 - DEM", "U.S.&nbsp;Sen. Dem. 2018"),
    ("US Senate 2018 - REP", "U.S.&nbsp;Sen. Rep. 2018"),
    ("US Senate 2020 - DEM", "U.S.&nbsp;Sen. Dem. 2020"),
    ("US Senate 2020 - REP", "U.S.&nbsp;Sen. Rep. 2020"),
];

/// Field-name fragments shortened for column titles, applied in order.
pub const FIELD_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Black Citizen Voting-Age Population", "Non-Hisp. Black CVAP"),
    ("Asian Citizen Voting-Age Population", "Non-Hisp. Asian CVAP"),
    ("American Indian or Alaska Native Citizen Voting-Age Population", "Non-Hisp. Native CVAP"),
    ("Citizen Voting-Age Population", "CVAP"),
    ("Population", "Pop."),
];

/// District fields to consider for this plan's table.
pub fn which_score_column_names(plan: &Plan) -> &'static [&'static str] {
    match plan.schema() {
        ScoreSchema::Simulated => FIELDS,
        ScoreSchema::UsHouse => US_HOUSE_FIELDS,
        ScoreSchema::RedBlue => RED_BLUE_FIELDS,
        ScoreSchema::Unscored => &[],
    }
}

/// Summary key holding the headline efficiency gap.
pub fn which_score_summary_name(plan: &Plan) -> Option<&'static str> {
    plan.primary_metric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn columns_follow_the_schema() {
        let unscored = Plan::from_value(json!({"summary": {}})).unwrap();
        assert!(which_score_column_names(&unscored).is_empty());

        let us_house = Plan::from_value(json!({"summary": {"US House Efficiency Gap": -0.2}})).unwrap();
        assert_eq!(which_score_column_names(&us_house), US_HOUSE_FIELDS);
        assert_eq!(which_score_summary_name(&us_house), Some("US House Efficiency Gap"));

        let red_blue = Plan::from_value(json!({"summary": {"Efficiency Gap": -0.2}})).unwrap();
        assert_eq!(which_score_column_names(&red_blue), ["Voters", "Blue Votes", "Red Votes"]);

        let simulated = Plan::from_value(json!({"summary": {"Efficiency Gap": -0.2, "Efficiency Gap SD": 0.01}})).unwrap();
        assert_eq!(which_score_column_names(&simulated).len(), FIELDS.len());
        assert_eq!(which_score_column_names(&simulated)[5], "Population 2020 ACS");
    }
}
