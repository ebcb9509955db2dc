//! Fairness metric score cards and the summary metrics table.

use serde::Serialize;

use super::columns::{DEMOCRATIC_VOTES, REPUBLICAN_VOTES};
use super::format::{nice_percent, nice_round_percent, partisan_suffix, round_hundredths};
use crate::bias::{BiasLookup, BiasScale, MetricKey, lookup_bias_with};
use crate::config::MetricUrls;
use crate::plan::Plan;

/// Vote-share skew beyond which partisan bias and mean-median are withheld.
pub const VOTESHARE_SKEW_LIMIT: f64 = 0.1;

pub const DECLINATION_INVALID_REASON: &str =
    "Declination is only shown where both parties each win one or more seats in the majority of predicted scenarios<sup>*</sup>.";
pub const DECLINATION_MISSING_REASON: &str =
    "We were not yet calculating declination at the time that we scored this plan.";

/// `Learn more` anchor for a metric page.
pub fn learn_more_link(url: &str) -> String {
    format!("<a href=\"{url}\">Learn more <i class=\"glyphicon glyphicon-chevron-right\" style=\"font-size:0.8em;\"></i></a>")
}

/// One metric's card: heading amount, explanatory sentence and gradient reading.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreCard {
    pub metric: MetricKey,
    pub title: &'static str,
    /// `5.0%&nbsp;D`; empty when hidden.
    pub amount: String,
    /// Explanatory HTML, or the reason the card is hidden.
    pub text: String,
    pub value: Option<f64>,
    /// Present only when the card is shown.
    pub lookup: Option<BiasLookup>,
}

impl ScoreCard {
    #[inline] pub fn is_shown(&self) -> bool { self.lookup.is_some() }

    fn shown(plan: &Plan, metric: MetricKey, title: &'static str, value: f64, amount: String, text: String) -> Self {
        let scale = BiasScale::for_chart(plan.chamber(), metric);
        let lookup = lookup_bias_with(Some(value), metric, &scale);
        Self { metric, title, amount, text, value: Some(value), lookup: Some(lookup) }
    }

    fn hidden(metric: MetricKey, title: &'static str, reason: impl Into<String>) -> Self {
        Self { metric, title, amount: String::new(), text: reason.into(), value: None, lookup: None }
    }

    /// Heading text such as `Efficiency Gap: 5.0%&nbsp;D`.
    pub fn heading(&self) -> String {
        if self.amount.is_empty() { self.title.to_string() } else { format!("{}: {}", self.title, self.amount) }
    }
}

/// Scenario share favoring the winning side, flipped when the score is negative.
fn favoring_share(value: f64, positives: f64) -> f64 {
    if value < 0.0 { 1.0 - positives } else { positives }
}

fn amount(value: f64) -> String {
    format!("{}{}", nice_percent(value.abs()), partisan_suffix(value))
}

fn efficiency_gap_card(plan: &Plan, urls: &MetricUrls) -> Option<ScoreCard> {
    let summary = plan.summary();
    let gap = summary.number(plan.primary_metric()?)?;
    let gap_amount = amount(gap);
    let (win_party, win_partisans, lose_party) = if gap < 0.0 {
        ("Republican", "Republicans", "Democratic")
    } else {
        ("Democratic", "Democrats", "Republican")
    };

    let text = if let Some(positives) = summary.number("Efficiency Gap Positives") {
        format!(
            "Votes for {win_party} candidates are expected to be inefficient at a rate {gap_amount} lower than votes for {lose_party} candidates, favoring {win_partisans} in {} of predicted scenarios.<sup>*</sup> {}",
            nice_round_percent(favoring_share(gap, positives)),
            learn_more_link(&urls.eg),
        )
    } else {
        let error = summary.number("Efficiency Gap SD").unwrap_or(0.0);
        format!(
            "Votes for {win_party} candidates are expected to be inefficient at a rate {gap_amount}&nbsp;(±{}) lower than votes for {lose_party} candidates. {}",
            nice_percent(2.0 * error),
            learn_more_link(&urls.eg),
        )
    };

    Some(ScoreCard::shown(plan, MetricKey::Eg, "Efficiency Gap", gap, gap_amount, text))
}

fn declination_card(plan: &Plan, urls: &MetricUrls) -> ScoreCard {
    let summary = plan.summary();
    let title = "Declination";
    let Some(declination) = summary.number("Declination") else {
        let reason = if summary.contains("Declination") { DECLINATION_INVALID_REASON } else { DECLINATION_MISSING_REASON };
        return ScoreCard::hidden(MetricKey::D2, title, reason);
    };
    if summary.number("Declination Is Valid") == Some(0.0) {
        return ScoreCard::hidden(MetricKey::D2, title, DECLINATION_INVALID_REASON);
    }

    let dec_amount = format!("{}{}", round_hundredths(declination), partisan_suffix(declination));
    let (win_party, win_partisans, lose_party) = if declination < 0.0 {
        ("Republican", "Republicans", "Democratic")
    } else {
        ("Democratic", "Democrats", "Republican")
    };

    let text = summary.number("Declination Positives")
        .map(|positives| format!(
            "The difference between mean {lose_party} vote share in {lose_party} districts and mean {win_party} vote share in {win_party} districts along with the relative fraction of seats won by each party leads to a declination that favors {win_partisans} in {} of predicted scenarios.<sup>*</sup> {}",
            nice_round_percent(favoring_share(declination, positives)),
            learn_more_link(&urls.d2),
        ))
        .unwrap_or_default();

    ScoreCard::shown(plan, MetricKey::D2, title, declination, dec_amount, text)
}

fn partisan_bias_card(plan: &Plan, urls: &MetricUrls) -> Option<ScoreCard> {
    let summary = plan.summary();
    let bias = summary.number("Partisan Bias")?;
    let bias_amount = amount(bias);
    let winners = if bias < 0.0 { "Republicans" } else { "Democrats" };

    let text = if let Some(positives) = summary.number("Partisan Bias Positives") {
        format!(
            "{winners} would be expected to win {bias_amount} extra seats in a hypothetical, perfectly tied election, favoring {winners} in {} of predicted scenarios.<sup>*</sup> {}",
            nice_round_percent(favoring_share(bias, positives)),
            learn_more_link(&urls.pb),
        )
    } else {
        let error = summary.number("Partisan Bias SD").unwrap_or(0.0);
        format!(
            "{winners} would be expected to win {bias_amount}&nbsp;(±{}) extra seats in a hypothetical, perfectly tied election. {}",
            nice_percent(2.0 * error),
            learn_more_link(&urls.pb),
        )
    };

    Some(ScoreCard::shown(plan, MetricKey::Pb, "Partisan Bias", bias, bias_amount, text))
}

fn mean_median_card(plan: &Plan, urls: &MetricUrls) -> Option<ScoreCard> {
    let summary = plan.summary();
    let diff = summary.number("Mean-Median")?;
    let diff_amount = amount(diff);
    let (win_party, win_partisans) = if diff < 0.0 { ("Republican", "Republicans") } else { ("Democrat", "Democrats") };

    let text = if let Some(positives) = summary.number("Mean-Median Positives") {
        format!(
            "The median {win_party} vote share is expected to be {diff_amount} higher than the mean {win_party} vote share, favoring {win_partisans} in {} of predicted scenarios.<sup>*</sup> {}",
            nice_round_percent(favoring_share(diff, positives)),
            learn_more_link(&urls.mm),
        )
    } else {
        let error = summary.number("Mean-Median SD").unwrap_or(0.0);
        format!(
            "The median {win_party} vote share is expected to be {diff_amount}&nbsp;(±{}) higher than the mean {win_party} vote share. {}",
            nice_percent(2.0 * error),
            learn_more_link(&urls.mm),
        )
    };

    Some(ScoreCard::shown(plan, MetricKey::Mm, "Mean-Median Difference", diff, diff_amount, text))
}

fn skew_reason(plan: &Plan, metric_phrase: &str) -> String {
    format!(
        "The parties’ statewide vote shares are {} based on the model. {metric_phrase} is shown only where the parties’ statewide vote shares fall between 45% and 55%. Outside this range the metric’s assumptions are not plausible.",
        nice_plan_voteshare(plan),
    )
}

/// Sum of Democratic and Republican votes over every district.
fn statewide_votes(plan: &Plan) -> (f64, f64) {
    plan.districts().iter().fold((0.0, 0.0), |(blue, red), d| {
        (blue + d.total(DEMOCRATIC_VOTES).unwrap_or(0.0), red + d.total(REPUBLICAN_VOTES).unwrap_or(0.0))
    })
}

/// Statewide two-party skew `|D - R| / (D + R)`; `None` without votes.
pub fn plan_voteshare(plan: &Plan) -> Option<f64> {
    let (blue, red) = statewide_votes(plan);
    let total = blue + red;
    (total > 0.0).then(|| (blue - red).abs() / total)
}

/// `52.0% (Democratic) and 48.0% (Republican)`
pub fn nice_plan_voteshare(plan: &Plan) -> String {
    let (blue, red) = statewide_votes(plan);
    let total = blue + red;
    format!("{} (Democratic) and {} (Republican)", nice_percent(blue / total), nice_percent(red / total))
}

/// Partisan bias and mean-median only make sense for near-even statewide votes.
pub fn shows_seat_metrics(plan: &Plan, show_all: bool) -> bool {
    show_all || plan_voteshare(plan).is_some_and(|v| v < VOTESHARE_SKEW_LIMIT)
}

/// Every score card for a finished plan, efficiency gap first.
pub fn score_cards(plan: &Plan, urls: &MetricUrls, show_all: bool) -> Vec<ScoreCard> {
    let mut cards = Vec::with_capacity(4);
    cards.extend(efficiency_gap_card(plan, urls));
    cards.push(declination_card(plan, urls));

    if shows_seat_metrics(plan, show_all) {
        cards.extend(partisan_bias_card(plan, urls));
        cards.extend(mean_median_card(plan, urls));
    } else {
        cards.push(ScoreCard::hidden(MetricKey::Pb, "Partisan Bias", skew_reason(plan, "Partisan bias")));
        cards.push(ScoreCard::hidden(MetricKey::Mm, "Mean-Median Difference", skew_reason(plan, "The mean-median difference")));
    }
    cards
}

/// One metrics table row; rank columns are `None` in the short table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsRow {
    pub name: &'static str,
    pub url: String,
    pub value: String,
    pub favors_democrats: String,
    pub skewed_rank: Option<String>,
    pub democratic_rank: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsTable {
    /// Whether historical percent ranks are shown.
    pub ranked: bool,
    pub rows: Vec<MetricsRow>,
}

const ABSOLUTE_RANK_KEY: &str = "Efficiency Gap Absolute Percent Rank";

fn pro_party(value: f64) -> &'static str {
    if value < 0.0 { "Republican" } else { "Democratic" }
}

fn metrics_row(plan: &Plan, name: &'static str, url: &str, prefix: &str, value: Option<f64>, display: String, ranked: bool) -> MetricsRow {
    let summary = plan.summary();
    let number = |suffix: &str| summary.number(&format!("{prefix} {suffix}")).unwrap_or(f64::NAN);
    let relative = value.map_or(f64::NAN, |v| favoring_share(v, number("Relative Percent Rank")));
    MetricsRow {
        name,
        url: url.to_string(),
        value: display,
        favors_democrats: nice_round_percent(number("Positives")),
        skewed_rank: ranked.then(|| nice_round_percent(number("Absolute Percent Rank"))),
        democratic_rank: ranked.then(|| nice_round_percent(relative)),
    }
}

fn unavailable_row(name: &'static str, url: &str, ranked: bool) -> MetricsRow {
    let na = || "N/A".to_string();
    MetricsRow {
        name,
        url: url.to_string(),
        value: na(),
        favors_democrats: na(),
        skewed_rank: ranked.then(na),
        democratic_rank: ranked.then(na),
    }
}

/// Summary table of all four metrics, when the plan carries historical ranks.
pub fn metrics_table(plan: &Plan, urls: &MetricUrls, show_all: bool) -> Option<MetricsTable> {
    let summary = plan.summary();
    if !summary.contains(ABSOLUTE_RANK_KEY) { return None }
    let ranked = summary.number(ABSOLUTE_RANK_KEY).is_some();

    let gap = plan.primary_metric().and_then(|key| summary.number(key));
    let gap_display = gap.map_or_else(|| "–".to_string(), |v| format!("{} Pro-{}", nice_percent(v.abs()), pro_party(v)));
    let declination = summary.number("Declination");
    let dec_display = declination.map_or_else(|| "–".to_string(), |v| format!("{} Pro-{}", round_hundredths(v), pro_party(v)));

    let mut rows = vec![
        metrics_row(plan, "Efficiency Gap", &urls.eg, "Efficiency Gap", gap, gap_display, ranked),
        metrics_row(plan, "Declination", &urls.d2, "Declination", declination, dec_display, ranked),
    ];

    if shows_seat_metrics(plan, show_all) {
        for (name, url, key) in [("Partisan Bias", &urls.pb, "Partisan Bias"), ("Mean-Median Difference", &urls.mm, "Mean-Median")] {
            let value = summary.number(key);
            let display = value.map_or_else(|| "–".to_string(), |v| format!("{} Pro-{}", nice_percent(v.abs()), pro_party(v)));
            rows.push(metrics_row(plan, name, url, key, value, display, ranked));
        }
    } else {
        rows.push(unavailable_row("Partisan Bias", &urls.pb, ranked));
        rows.push(unavailable_row("Mean-Median Difference", &urls.mm, ranked));
    }

    Some(MetricsTable { ranked, rows })
}

impl MetricsTable {
    pub fn to_html(&self) -> String {
        let mut out = String::from("<thead><tr><th>Metric</th><th>Value</th><th>Favors Democrats in this % of Scenarios<sup>*</sup></th>");
        if self.ranked {
            out.push_str("<th>More Skewed than this % of Historical Plans<sup>‡</sup></th>");
            out.push_str("<th>More Pro-Democratic than this % of Historical Plans<sup>‡</sup></th>");
        }
        out.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            out.push_str(&format!(
                "<tr><th><a href=\"{}\">{}</a></th><td>{}</td><td>{}</td>",
                row.url, row.name, row.value, row.favors_democrats,
            ));
            for rank in [&row.skewed_rank, &row.democratic_rank].into_iter().flatten() {
                out.push_str(&format!("<td>{rank}</td>"));
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody>");
        out
    }
}
