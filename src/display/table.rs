use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::color::which_district_color;
use super::columns::{
    DEMOCRATIC_VOTES, DEMOCRATIC_WINS, FIELD_ABBREVIATIONS, REPUBLICAN_VOTES, VOTE_FIELD_TITLES,
    which_score_column_names,
};
use super::format::{nice_count, nice_percent, nice_round_percent, nice_string};
use crate::plan::{Plan, Values};

/// Boolean column inserted before `Democratic Wins`.
pub const FLIP_COLUMN: &str = "Chance of 1+ Flips<sup>†</sup>";

/// One table cell before HTML formatting.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Flag(bool),
    Missing,
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(Cell::Missing, Cell::Number),
            Value::String(s) => Cell::Text(s.clone()),
            Value::Bool(b) => Cell::Flag(*b),
            _ => Cell::Missing,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self { Cell::Text(value.to_string()) }
}

impl Cell {
    #[inline] pub fn as_f64(&self) -> Option<f64> {
        match self { Cell::Number(n) => Some(*n), _ => None }
    }

    /// Cell contents as table HTML.
    pub fn to_html(&self) -> String {
        match self {
            Cell::Number(n) => nice_count(*n),
            Cell::Text(s) => nice_string(s),
            Cell::Flag(b) => (if *b { "Yes" } else { "No" }).to_string(),
            Cell::Missing => "–".to_string(),
        }
    }

    /// Cell contents as plain text.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            other => other.to_html(),
        }
    }
}

/// Column heading after renaming.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub title: String,
    /// Full field name when the title was abbreviated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Kept in the model but hidden when rendered.
    pub shy: bool,
}

impl Heading {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), tooltip: None, shy: false }
    }
}

/// District table: one row per district, index-aligned with the plan's districts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Table {
    pub head: Vec<Heading>,
    pub rows: Vec<Vec<Cell>>,
    /// Whether the second column is the candidate scenario.
    pub incumbency: bool,
    /// Per-row `is_counted` flag.
    pub counted: Vec<bool>,
    /// Per-row flag set when any vote column holds a positive count.
    pub has_votes: Vec<bool>,
}

/// Build the district table, or `None` when the plan has no districts yet.
pub fn plan_array(plan: &Plan) -> Option<Table> {
    let districts = plan.districts();
    if districts.is_empty() { return None }

    let incumbency = plan.has_incumbency();
    let mut head = vec!["District".to_string()];
    if incumbency { head.push("Candidate Scenario".to_string()) }

    let mut rows: Vec<Vec<Cell>> = districts.iter().enumerate()
        .map(|(i, district)| {
            let mut row = vec![Cell::Text(district.label(i))];
            if incumbency {
                row.push(plan.incumbency_label(i).map_or(Cell::Missing, Cell::from));
            }
            row
        })
        .collect();

    for &field in which_score_column_names(plan) {
        if !districts.iter().all(|d| d.has_field(field)) { continue }

        if field == DEMOCRATIC_WINS {
            head.push(FLIP_COLUMN.to_string());
            for (row, district) in rows.iter_mut().zip(districts) {
                row.push(Cell::Flag(which_district_color(district, plan).is_lean()));
            }
        }

        head.push(field.to_string());
        for (row, district) in rows.iter_mut().zip(districts) {
            row.push(district.value(field).map_or(Cell::Missing, Cell::from));
        }
    }

    // Shares first: vote updates may drop a column and shift later indices.
    for (row, district) in rows.iter_mut().zip(districts) {
        update_share_percentages(&head, row);
        update_vote_percentages(&head, row, &district.totals);
    }

    let has_votes = districts.iter()
        .map(|d| VOTE_FIELD_TITLES.iter().any(|(field, _)| d.total(field).is_some_and(|v| v > 0.0)))
        .collect();

    Some(Table {
        head: update_heading_titles(&head),
        rows,
        incumbency,
        counted: districts.iter().map(|d| d.is_counted()).collect(),
        has_votes,
    })
}

fn position(head: &[String], name: &str) -> Option<usize> {
    head.iter().position(|h| h == name)
}

/// Replace raw vote counts in `row` with shares of the two-party total.
pub fn update_vote_percentages(head: &[String], row: &mut Vec<Cell>, source: &Values) {
    let dem = position(head, DEMOCRATIC_VOTES);
    let rep = position(head, REPUBLICAN_VOTES);

    if let Some(wins) = position(head, DEMOCRATIC_WINS) {
        if let Some(p) = row[wins].as_f64() {
            row[wins] = Cell::Text(nice_round_percent(p));
        }
        let (Some(dem), Some(rep)) = (dem, rep) else { return };
        if let (Some(d), Some(r)) = (row[dem].as_f64(), row[rep].as_f64()) {
            let count = d + r;
            row[dem] = Cell::Text(format!("{} D / {} R", nice_round_percent(d / count), nice_round_percent(r / count)));
        }
        row.remove(rep);
        return;
    }

    let (Some(dem), Some(rep)) = (dem, rep) else { return };
    let (Some(d), Some(r)) = (row[dem].as_f64(), row[rep].as_f64()) else { return };
    let count = d + r;
    let mut dem_text = nice_percent(d / count);
    let mut rep_text = nice_percent(r / count);

    if let (Some(dem_sd), Some(rep_sd)) = (source.number("Democratic Votes SD"), source.number("Republican Votes SD")) {
        dem_text.push_str(&format!(" (±{})", nice_percent(2.0 * dem_sd / count)));
        rep_text.push_str(&format!(" (±{})", nice_percent(2.0 * rep_sd / count)));
    }

    row[dem] = Cell::Text(dem_text);
    row[rep] = Cell::Text(rep_text);
}

/// Groups converted together: every field must be present or none change.
const SHARE_GROUPS: &[(&str, &[&str])] = &[
    ("Population 2015", &["Black Population 2015", "Hispanic Population 2015"]),
    ("Population 2016", &["Black Population 2016", "Hispanic Population 2016"]),
    ("Population 2018", &["Black Population 2018", "Hispanic Population 2018"]),
    ("Population 2019", &["Black Population 2019", "Hispanic Population 2019"]),
    ("Citizen Voting-Age Population 2015", &[
        "Black Citizen Voting-Age Population 2015",
        "Hispanic Citizen Voting-Age Population 2015",
    ]),
    ("Citizen Voting-Age Population 2018", &[
        "Black Citizen Voting-Age Population 2018",
        "Hispanic Citizen Voting-Age Population 2018",
    ]),
];

/// Converted one at a time.
const SHARE_FIELDS: &[(&str, &[&str])] = &[
    ("Citizen Voting-Age Population 2019", &[
        "Black Citizen Voting-Age Population 2019",
        "Hispanic Citizen Voting-Age Population 2019",
        "Asian Citizen Voting-Age Population 2019",
        "American Indian or Alaska Native Citizen Voting-Age Population 2019",
    ]),
];

fn share_of(row: &mut [Cell], part: usize, total: usize) {
    if let (Some(p), Some(t)) = (row[part].as_f64(), row[total].as_f64()) {
        row[part] = Cell::Text(nice_percent(p / t));
    }
}

/// Replace demographic counts in `row` with percentages of their population total.
pub fn update_share_percentages(head: &[String], row: &mut [Cell]) {
    for (total, parts) in SHARE_GROUPS {
        let Some(total) = position(head, total) else { continue };
        let Some(parts) = parts.iter().map(|p| position(head, p)).collect::<Option<Vec<_>>>() else { continue };
        for part in parts { share_of(row, part, total) }
    }

    for (total, parts) in SHARE_FIELDS {
        let Some(total) = position(head, total) else { continue };
        for part in parts.iter().filter_map(|p| position(head, p)) {
            share_of(row, part, total);
        }
    }
}

/// Presidential columns hidden when a later race for the same party is shown.
const PRESIDENTIAL_TITLES: &[(&str, &[&str])] = &[
    ("Clinton (D) 2016", &["Biden (D) 2020", "Harris (D) 2024"]),
    ("Trump (R) 2016", &["Trump (R) 2020", "Trump (R) 2024"]),
    ("Biden (D) 2020", &["Harris (D) 2024"]),
    ("Trump (R) 2020", &["Trump (R) 2024"]),
];

/// Rename raw field names for display and flag shy columns.
pub fn update_heading_titles(head: &[String]) -> Vec<Heading> {
    let mut titles = head.to_vec();
    let dem = position(head, DEMOCRATIC_VOTES);
    let rep = position(head, REPUBLICAN_VOTES);

    if let Some(wins) = position(head, DEMOCRATIC_WINS) {
        titles[wins] = "Chance of Democratic Win".to_string();
        if let (Some(dem), Some(rep)) = (dem, rep) {
            titles[dem] = "Predicted Vote Shares".to_string();
            titles.remove(rep);
        }
    } else if let (Some(dem), Some(rep)) = (dem, rep) {
        titles[dem] = "Predicted Democratic Vote Share".to_string();
        titles[rep] = "Predicted Republican Vote Share".to_string();
    }

    let mut head: Vec<Heading> = titles.into_iter()
        .map(|title| {
            let mut heading = Heading::new(title);
            if let Some((_, renamed)) = VOTE_FIELD_TITLES.iter().find(|(field, _)| *field == heading.title) {
                heading.title = renamed.to_string();
            }
            for (fragment, short) in FIELD_ABBREVIATIONS {
                if heading.title.contains(fragment) {
                    heading.tooltip.get_or_insert_with(|| heading.title.clone());
                    heading.title = heading.title.replacen(fragment, short, 1);
                }
            }
            heading
        })
        .collect();

    let present: Vec<String> = head.iter().map(|h| h.title.clone()).collect();
    for heading in &mut head {
        let superseded = PRESIDENTIAL_TITLES.iter()
            .find(|(title, _)| *title == heading.title)
            .is_some_and(|(_, later)| later.iter().any(|l| present.iter().any(|p| p == l)));
        heading.shy = superseded || heading.title == "CVAP 2019";
    }
    head
}

/// Remove markup and entities from an HTML fragment.
pub fn strip_markup(html: &str) -> Result<String> {
    let tags = Regex::new(r"<[^>]*>")?;
    let text = tags.replace_all(html, "");
    Ok(text.replace("&nbsp;", " ").replace("&quot;", "\"").replace("&amp;", "&"))
}

impl Table {
    #[inline] pub fn visible_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.head.iter().enumerate().filter(|(_, h)| !h.shy).map(|(i, _)| i)
    }

    /// Raw headings and cells, headings first.
    pub fn to_array(&self) -> Vec<Vec<Cell>> {
        let mut out = vec![self.head.iter().map(|h| Cell::Text(h.title.clone())).collect()];
        out.extend(self.rows.iter().cloned());
        out
    }

    /// Row class and hover title for the district at `index`.
    pub fn row_status(&self, index: usize) -> (&'static str, String) {
        let label = self.rows[index].first().map(Cell::to_text).unwrap_or_default();
        if !self.counted[index] {
            ("no-votes", format!("District {label} has insufficient votes and does not count toward partisan scores"))
        } else if self.has_votes[index] {
            ("has-votes", String::new())
        } else {
            ("no-votes", format!("District {label} has no votes and does not count toward partisan scores"))
        }
    }

    fn align(&self, column: usize) -> &'static str {
        if column == 1 && self.incumbency { " class=\"ltxt\"" } else { "" }
    }

    /// `<thead>` and `<tbody>` markup; rows carry `data-index` for map cross-highlighting.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<thead><tr>");
        for j in self.visible_columns() {
            let heading = &self.head[j];
            let tooltip = heading.tooltip.as_ref()
                .map(|t| format!(" title=\"{t}\""))
                .unwrap_or_default();
            out.push_str(&format!("<th{}{tooltip}>{}</th>", self.align(j), heading.title));
        }
        out.push_str("</tr></thead><tbody>");

        for (i, row) in self.rows.iter().enumerate() {
            let (class, title) = self.row_status(i);
            out.push_str(&format!("<tr class=\"{class}\" title=\"{title}\" data-index=\"{i}\">"));
            for j in self.visible_columns() {
                let value = row.get(j).map(Cell::to_html).unwrap_or_default();
                let tag = if j == 0 { "th" } else { "td" };
                out.push_str(&format!("<{tag}{}>{value}</{tag}>", self.align(j)));
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody>");
        out
    }

    /// Column-aligned plain text for terminals.
    pub fn to_text(&self) -> Result<String> {
        let columns: Vec<usize> = self.visible_columns().collect();
        let mut lines: Vec<Vec<String>> = Vec::with_capacity(self.rows.len() + 1);
        lines.push(columns.iter().map(|&j| strip_markup(&self.head[j].title)).collect::<Result<_>>()?);
        for row in &self.rows {
            lines.push(columns.iter().map(|&j| row.get(j).map(Cell::to_text).unwrap_or_default()).collect());
        }

        let widths: Vec<usize> = (0..columns.len())
            .map(|c| lines.iter().map(|l| l[c].chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for line in &lines {
            let cells: Vec<String> = line.iter().zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        Ok(out)
    }
}
