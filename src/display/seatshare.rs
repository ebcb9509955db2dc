use serde::Serialize;

use super::color::{DistrictColor, which_district_color};
use super::columns::{DEMOCRATIC_VOTES, DEMOCRATIC_WINS, REPUBLICAN_VOTES};
use super::format::nice_round_percent;
use crate::config::ImageUrls;
use crate::plan::{District, Plan};

/// Seat-share strip: one box per counted district, most Democratic first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeatShare {
    pub colors: Vec<DistrictColor>,
    pub red_votes: f64,
    pub blue_votes: f64,
    pub total_votes: f64,
    /// Mean Democratic win probability.
    pub seat_share: f64,
}

/// Build the strip, or `None` when districts carry no win probabilities.
pub fn seat_share_array(plan: &Plan) -> Option<SeatShare> {
    if !plan.has_win_probabilities() { return None }

    let mut districts: Vec<_> = plan.districts().iter().filter(|d| d.is_counted()).collect();
    let wins = |d: &&District| d.total(DEMOCRATIC_WINS).unwrap_or(0.0);
    districts.sort_by(|a, b| wins(b).total_cmp(&wins(a)));

    let colors = districts.iter().map(|d| which_district_color(d, plan)).collect();
    let red_votes: f64 = districts.iter().filter_map(|d| d.total(REPUBLICAN_VOTES)).sum();
    let blue_votes: f64 = districts.iter().filter_map(|d| d.total(DEMOCRATIC_VOTES)).sum();
    let seat_share = districts.iter().map(wins).sum::<f64>() / districts.len() as f64;

    Some(SeatShare { colors, red_votes, blue_votes, total_votes: red_votes + blue_votes, seat_share })
}

impl SeatShare {
    pub fn summary_text(&self) -> String {
        format!(
            "Predicted {} D / {} R seat share across scenarios<sup>*</sup> vs. {} D / {} R vote share.",
            nice_round_percent(self.seat_share),
            nice_round_percent(1.0 - self.seat_share),
            nice_round_percent(self.blue_votes / self.total_votes),
            nice_round_percent(self.red_votes / self.total_votes),
        )
    }

    /// Box spans followed by the summary sentence.
    pub fn to_html(&self, images: &ImageUrls) -> String {
        let count = self.colors.len();
        let mut out = String::new();
        let mut last: Option<DistrictColor> = None;

        for &color in &self.colors {
            let gutter = if last.is_some_and(|l| l != color) { "3px" } else { "1px" };
            last = Some(color);

            let mut background = color.hex().to_string();
            match color {
                DistrictColor::LeanDemocratic => background.push_str(&format!(" url(&quot;{}&quot;)", images.lean_blue_pattern)),
                DistrictColor::LeanRepublican => background.push_str(&format!(" url(&quot;{}&quot;)", images.lean_red_pattern)),
                _ => {}
            }
            if count > 50 { background.push_str(" fixed") }

            out.push_str(&format!(
                "<span style=\"width:calc({}% - {gutter});margin-left:{gutter};background:{background};\" class=\"seatshare-box\"> </span>",
                100.0 / count as f64,
            ));
        }

        out.push_str("<br>");
        out.push_str(&self.summary_text());
        out
    }
}
