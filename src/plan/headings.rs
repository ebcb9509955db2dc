use serde::Serialize;
use time::{OffsetDateTime, macros::format_description};

use super::{Model, Plan};

const MONTHS: [&str; 12] = [
    "Jan. ", "Feb. ", "Mar. ", "Apr. ", "May ", "Jun. ",
    "Jul. ", "Aug. ", "Sep. ", "Oct. ", "Nov. ", "Dec. ",
];

const DAY_SECONDS: i64 = 60 * 60 * 24;

/// Text shown above a scored plan.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlanHeadings {
    pub description: Option<String>,
    /// `Uploaded: 1/14/2018`, with the time of day for recent uploads.
    pub uploaded: Option<String>,
    /// `Jan. 14, 2018`
    pub date_only: Option<String>,
    pub state: Option<&'static str>,
    pub house: Option<&'static str>,
    /// `13 seats`
    pub seats: String,
}

/// Upload time: the model's start time wins over the response's `Last-Modified`.
pub fn upload_time(plan: &Plan, modified_at: Option<OffsetDateTime>) -> Option<OffsetDateTime> {
    plan.start_time()
        .filter(|t| *t != 0.0)
        .and_then(|t| OffsetDateTime::from_unix_timestamp_nanos((t * 1e9) as i128).ok())
        .or(modified_at)
}

pub fn plan_headings(plan: &Plan, modified_at: Option<OffsetDateTime>, now: OffsetDateTime) -> PlanHeadings {
    let at = upload_time(plan, modified_at);
    let model = plan.model();

    PlanHeadings {
        description: plan.description().filter(|d| !d.is_empty()).map(str::to_string),
        uploaded: at.map(|at| format!("Uploaded: {}", age_aware_time(at, now))),
        date_only: at.map(date_only),
        state: model.and_then(Model::state_name),
        house: model.and_then(Model::chamber).map(|c| c.display_name()),
        seats: seat_count(plan.districts().len()),
    }
}

/// Sentence shown on the preread page, e.g. `North Carolina U.S. House plan uploaded on 12/28/2019`.
pub fn preread_description(plan: &Plan, modified_at: Option<OffsetDateTime>, now: OffsetDateTime) -> String {
    let subject = match plan.model() {
        Some(model) => [
            model.state_name().unwrap_or_default(),
            model.chamber().map(|c| c.preread_name()).unwrap_or_default(),
            "plan uploaded",
        ].join(" "),
        None => "Plan uploaded".to_string(),
    };

    match upload_time(plan, modified_at) {
        Some(at) if is_older_than_a_day(at, now) => format!("{subject} on {}", locale_date(at)),
        Some(at) => format!("{subject} at {}", locale_datetime(at)),
        None => subject,
    }
}

pub fn seat_count(n: usize) -> String {
    if n == 1 { "1 seat".to_string() } else { format!("{n} seats") }
}

/// Link to the model description page for this plan's model version.
pub fn model_link(model: Option<&Model>, url_pattern: &str) -> Option<String> {
    let model = model?;
    match model.version.as_deref() {
        None | Some("2017") => {
            let prefix = model.key_prefix.as_deref()?;
            Some(url_pattern.replacen("data/2020", prefix, 1))
        }
        Some(version) => Some(url_pattern.replacen("2020", version, 1)),
    }
}

fn is_older_than_a_day(at: OffsetDateTime, now: OffsetDateTime) -> bool {
    (now - at).whole_seconds() > DAY_SECONDS
}

fn age_aware_time(at: OffsetDateTime, now: OffsetDateTime) -> String {
    if is_older_than_a_day(at, now) { locale_date(at) } else { locale_datetime(at) }
}

pub(crate) fn locale_date(at: OffsetDateTime) -> String {
    format!("{}/{}/{}", u8::from(at.month()), at.day(), at.year())
}

pub(crate) fn locale_datetime(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[month padding:none]/[day padding:none]/[year], [hour repr:12 padding:none]:[minute]:[second] [period]"
    ))
    .unwrap_or_else(|_| at.to_string())
}

pub(crate) fn date_only(at: OffsetDateTime) -> String {
    format!("{}{}, {}", MONTHS[usize::from(u8::from(at.month())) - 1], at.day(), at.year())
}
