// Integration tests for rendering scored plans:
//   schema detection, district tables, colors, score cards, seat shares

use planscore::display::{
    Cell, DistrictColor, FLIP_COLUMN, ftva_races, library_panel, metrics_table, plan_array,
    score_cards, seat_share_array, sensitivity, which_district_color,
};
use planscore::plan::plan_headings;
use planscore::{Plan, ScoreSchema, SiteConfig};
use time::macros::datetime;

fn fixture(name: &str) -> Plan {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(path).unwrap();
    Plan::from_json_str(&text).unwrap()
}

fn titles(plan: &Plan) -> Vec<String> {
    plan_array(plan).unwrap().head.into_iter().map(|h| h.title).collect()
}

#[test]
fn detects_each_scoring_model() {
    assert_eq!(fixture("simulated.json").schema(), ScoreSchema::Simulated);
    assert_eq!(fixture("ushouse_2017.json").schema(), ScoreSchema::UsHouse);
    assert_eq!(fixture("redblue.json").schema(), ScoreSchema::RedBlue);
    assert_eq!(fixture("processing.json").schema(), ScoreSchema::Unscored);
}

#[test]
fn processing_plan_is_not_scored() {
    let plan = fixture("processing.json");
    assert!(!plan.is_scored());
    assert_eq!(plan.districts_count(), None);
    assert!(plan_array(&plan).is_none());
    assert!(plan.message().unwrap().starts_with("Scoring this newly-uploaded plan"));
}

#[test]
fn simulated_table_merges_vote_columns() {
    let plan = fixture("simulated.json");
    let table = plan_array(&plan).unwrap();
    let head = titles(&plan);

    assert_eq!(head[0], "District");
    assert_eq!(head[1], "Candidate Scenario");
    assert!(head.contains(&"Pop. 2020".to_string()));
    assert!(head.contains(&FLIP_COLUMN.to_string()));
    assert!(head.contains(&"Chance of Democratic Win".to_string()));
    assert!(head.contains(&"Predicted Vote Shares".to_string()));
    assert!(head.contains(&"Biden (D) 2020".to_string()));
    assert!(!head.iter().any(|h| h == "Republican Votes"));

    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.to_array().len(), 4);
    let shares = head.iter().position(|h| h == "Predicted Vote Shares").unwrap();
    let wins = head.iter().position(|h| h == "Chance of Democratic Win").unwrap();
    let flip = head.iter().position(|h| h == FLIP_COLUMN).unwrap();

    assert_eq!(table.rows[0][0].to_text(), "1");
    assert_eq!(table.rows[0][1].to_text(), "Democratic Incumbent");
    assert_eq!(table.rows[1][1].to_text(), "Open Seat");
    assert_eq!(table.rows[0][shares].to_text(), "67% D / 33% R");
    assert_eq!(table.rows[0][wins].to_text(), "95%");
    assert_eq!(table.rows[0][flip], Cell::Flag(false));
    assert_eq!(table.rows[1][flip], Cell::Flag(true));
    assert!(table.rows.iter().all(|row| row.len() == head.len()));
}

#[test]
fn simulated_table_html_marks_rows() {
    let plan = fixture("simulated.json");
    let html = plan_array(&plan).unwrap().to_html();
    assert!(html.starts_with("<thead><tr>"));
    assert!(html.contains(r#"data-index="2""#));
    assert!(html.contains(r#"class="has-votes""#));
    assert!(html.contains(r#"<th class="ltxt">Candidate Scenario</th>"#));
}

#[test]
fn colors_follow_win_probabilities() {
    let plan = fixture("simulated.json");
    let colors: Vec<_> = plan.districts().iter().map(|d| which_district_color(d, &plan)).collect();
    assert_eq!(colors, [DistrictColor::Democratic, DistrictColor::LeanRepublican, DistrictColor::Republican]);
}

#[test]
fn colors_follow_votes_without_simulations() {
    let plan = fixture("ushouse_2017.json");
    let colors: Vec<_> = plan.districts().iter().map(|d| which_district_color(d, &plan)).collect();
    assert_eq!(colors, [DistrictColor::Democratic, DistrictColor::Republican]);

    let plan = fixture("redblue.json");
    let colors: Vec<_> = plan.districts().iter().map(|d| which_district_color(d, &plan)).collect();
    assert_eq!(colors, [DistrictColor::Democratic, DistrictColor::Republican, DistrictColor::Republican]);
}

#[test]
fn older_models_keep_their_columns() {
    let head = titles(&fixture("ushouse_2017.json"));
    assert_eq!(head[0], "District");
    assert!(head.iter().any(|h| h == "Pop."));
    assert!(head.iter().any(|h| h == "US House Dem Votes"));

    let head = titles(&fixture("redblue.json"));
    assert_eq!(head, ["District", "Voters", "Blue Votes", "Red Votes"]);
}

#[test]
fn score_cards_for_even_state() {
    let plan = fixture("simulated.json");
    let cards = score_cards(&plan, &SiteConfig::default().metric_urls, false);
    assert_eq!(cards.len(), 4);
    assert!(cards.iter().all(|card| card.is_shown()));

    assert_eq!(cards[0].heading(), "Efficiency Gap: 8.0%&nbsp;R");
    assert!(cards[0].text.contains("favoring Republicans in 90% of predicted scenarios"));
    assert_eq!(cards[1].heading(), "Declination: 0.3&nbsp;R");
    assert!(cards[1].text.contains("favors Republicans in 85%"));
    assert_eq!(cards[2].title, "Partisan Bias");
    assert_eq!(cards[3].title, "Mean-Median Difference");
}

#[test]
fn older_cards_show_error_ranges() {
    let plan = fixture("ushouse_2017.json");
    let cards = score_cards(&plan, &SiteConfig::default().metric_urls, false);
    assert_eq!(cards[0].heading(), "Efficiency Gap: 12.0%&nbsp;D");
    assert!(cards[0].text.contains("(±0.0%)"));
    assert!(!cards[1].is_shown());
}

#[test]
fn metrics_table_lists_shown_cards() {
    let plan = fixture("simulated.json");
    let table = metrics_table(&plan, &SiteConfig::default().metric_urls, false).unwrap();
    assert!(table.ranked);
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[0].value, "8.0% Pro-Republican");
    assert_eq!(table.rows[0].favors_democrats, "10%");
    assert_eq!(table.rows[0].skewed_rank.as_deref(), Some("80%"));
    assert_eq!(table.rows[1].value, "0.3 Pro-Republican");
    assert!(table.to_html().contains("More Skewed than this % of Historical Plans"));

    assert!(metrics_table(&fixture("redblue.json"), &SiteConfig::default().metric_urls, false).is_none());
}

#[test]
fn seat_share_orders_most_democratic_first() {
    let plan = fixture("simulated.json");
    let share = seat_share_array(&plan).unwrap();
    assert_eq!(share.colors, [DistrictColor::Democratic, DistrictColor::LeanRepublican, DistrictColor::Republican]);
    assert_eq!(share.total_votes, 900000.0);
    assert_eq!(
        share.summary_text(),
        "Predicted 43% D / 57% R seat share across scenarios<sup>*</sup> vs. 49% D / 51% R vote share.",
    );
    assert!(seat_share_array(&fixture("redblue.json")).is_none());
}

#[test]
fn sensitivity_and_statewide_races() {
    let plan = fixture("simulated.json");
    let series = sensitivity(&plan).unwrap();
    let close = |i: usize, expected: f64| (series.values[i].unwrap() - expected).abs() < 1e-9;
    assert!(close(4, -6.0));
    assert!(close(5, -8.0));
    assert!(close(6, -10.0));
    assert_eq!(series.values[0], None);

    let races = ftva_races(&plan);
    assert_eq!(races.len(), 2);
    assert_eq!(races[0].heading(), "U.S. President 2020: 7.0%&nbsp;R");
    assert_eq!(races[1].office, "U.S. Senate");
}

#[test]
fn headings_and_library_links() {
    let plan = fixture("simulated.json");
    let headings = plan_headings(&plan, None, datetime!(2024-06-01 12:00 UTC));
    assert_eq!(headings.description.as_deref(), Some("North Carolina remedial plan"));
    assert_eq!(headings.state, Some("North Carolina"));
    assert_eq!(headings.house, Some("U.S. House"));
    assert_eq!(headings.seats, "3 seats");
    assert!(headings.date_only.unwrap().contains("2020"));

    let plan = plan.with_derived_geometry_key();
    let panel = library_panel(&plan, &SiteConfig::default()).unwrap();
    assert_eq!(panel.notes, "Enacted by court order.");
    assert_eq!(panel.links.len(), 2);
    assert_eq!(panel.links[0].text, "Authoritative Link");
    assert_eq!(
        panel.links[1].href,
        "https://planscore.s3.amazonaws.com/uploads/20200101T000000.abcdef/geometry.json",
    );
}
