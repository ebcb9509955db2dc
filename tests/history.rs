// Integration tests for the historical bias map and the upload handshake

use planscore::bias::{MetricKey, lookup_bias};
use planscore::client::{MemFetcher, Response, UploadForm, upload_id};
use planscore::history::{find_state, legend_breaks, state_biases};
use planscore::io::csv::read_bias_csv_str;
use planscore::{Chamber, SiteConfig, ViewState};

const CSV: &str = "\
state,year,bias
NC,2016,-0.19
NC,2018,-0.12
WI,2016,
MD,2016,0.04
MD,2018,0.01
PR,2016,0.3
";

#[test]
fn hash_selects_table_and_year() {
    let view = ViewState::from_hash("#2016-statesenate").unwrap();
    assert_eq!(view.year, 2016);
    assert_eq!(view.boundary, Chamber::StateSenate);
    assert_eq!(view.to_hash(), "#2016-statesenate");
    assert_eq!(
        SiteConfig::default().history_csv_url(&view.csv_name()),
        "https://planscore.org/static/bias_statesenate.csv",
    );
    assert_eq!(view.to_string(), "2016 State Senate");
    assert!(ViewState::from_hash("#2017-ushouse").is_err());
}

#[test]
fn csv_rows_color_the_year() {
    let records = read_bias_csv_str(CSV).unwrap();
    let view = ViewState::from_hash("#2016-ushouse").unwrap();
    let states = state_biases(&records, &view);
    assert_eq!(states.len(), 50);

    let nc = find_state(&states, "nc").unwrap();
    assert_eq!(nc.value, Some(-0.19));
    assert_eq!(nc.class().title, "More Biased Toward Republican");
    assert_eq!(nc.tooltip(), "North Carolina: Click for details");
    assert!(nc.analysis().contains("more biased than <b>69%</b> of plans"));
    assert!(nc.analysis().contains("in favor of <b>Republican</b> voters"));
    assert_eq!(nc.more_info_url(), "../north_carolina/");

    let wi = find_state(&states, "WI").unwrap();
    assert_eq!(wi.value, None);
    assert_eq!(wi.class().title, "No Data");
    assert_eq!(wi.tooltip(), "Wisconsin: No data");

    let md = find_state(&states, "MD").unwrap();
    assert_eq!(md.class().title, "Slightly Biased Toward Democrat");
    assert!(find_state(&states, "PR").is_none());
}

#[test]
fn small_gaps_read_as_balanced() {
    let records = read_bias_csv_str(CSV).unwrap();
    let view = ViewState::from_hash("#2018-ushouse").unwrap();
    let states = state_biases(&records, &view);
    let md = find_state(&states, "MD").unwrap();
    assert_eq!(md.class().title, "Balanced");
    assert!(md.analysis().starts_with("This plan shows no statistically significant skew"));
}

#[test]
fn legend_ends_with_no_data() {
    let breaks = legend_breaks();
    assert_eq!(breaks.len(), 10);
    assert_eq!(breaks[0].title, "Most Biased Toward Republican");
    assert_eq!(breaks[9].title, "No Data");
}

#[test]
fn gradient_lookup_names_the_party() {
    assert_eq!(lookup_bias(Some(0.15), MetricKey::Eg).party, "Democrat");
    assert_eq!(lookup_bias(Some(-0.15), MetricKey::Eg).party, "Republican");
    assert!(lookup_bias(None, MetricKey::Eg).is_no_data());
}

#[test]
fn upload_form_and_redirect() {
    let config = SiteConfig::default().with_api_base("http://localhost:5000");
    assert_eq!(config.upload_url, "http://localhost:5000/upload");

    let mut fetcher = MemFetcher::new().respond(&config.upload_url, Response::ok(
        r#"["https://bucket.s3.amazonaws.com/", {"key": "uploads/abc/upload/${filename}", "acl": "bucket-owner-full-control"}]"#,
    ));
    let form = UploadForm::fetch(&mut fetcher, &config.upload_url).unwrap();
    assert_eq!(form.action, "https://bucket.s3.amazonaws.com/");
    assert_eq!(form.fields["acl"], "bucket-owner-full-control");

    assert_eq!(upload_id("https://planscore.org/plan.html?id=20200101T000000.abcdef").as_deref(), Some("20200101T000000.abcdef"));
    assert_eq!(upload_id("https://planscore.org/plan.html"), None);
}
