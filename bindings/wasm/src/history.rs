use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use planscore_core::{
    Chamber, ViewState,
    bias::{BiasScale, MetricKey, lookup_bias_with},
    history::{classify, find_state, legend_html, state_biases},
    io::csv::read_bias_csv_str,
};

use crate::common::*;

/// Parse a `#2016-ushouse` hash, falling back to the default view.
#[wasm_bindgen]
pub fn view_from_hash(hash: Option<String>) -> Result<JsValue, JsValue> {
    let view = match hash.as_deref().filter(|h| !h.is_empty()) {
        Some(hash) => ViewState::from_hash(hash).map_err(js_err)?,
        None => ViewState::default(),
    };
    to_js(&serde_json::json!({"year": view.year, "boundary": view.boundary, "hash": view.to_hash(), "csv": view.csv_name()}))
}

/// Per-state bias, class color and tooltip for one view of a bias CSV.
#[wasm_bindgen]
pub fn state_bias_data(csv: String, hash: String) -> Result<JsValue, JsValue> {
    let view = ViewState::from_hash(&hash).map_err(js_err)?;
    let records = read_bias_csv_str(&csv).map_err(js_err)?;
    let rows = state_biases(&records, &view).iter()
        .map(|s| serde_json::json!({
            "abbr": s.code,
            "name": s.name,
            "value": s.value,
            "color": s.class().color,
            "tooltip": s.tooltip(),
        }))
        .collect::<Vec<_>>();
    to_js(&rows)
}

/// Popup analysis and more-info link for one state.
#[wasm_bindgen]
pub fn state_analysis(csv: String, hash: String, state: String) -> Result<JsValue, JsValue> {
    let view = ViewState::from_hash(&hash).map_err(js_err)?;
    let records = read_bias_csv_str(&csv).map_err(js_err)?;
    let states = state_biases(&records, &view);
    let info = find_state(&states, &state).ok_or_else(|| js_err(format!("unknown state {state:?}")))?;
    to_js(&serde_json::json!({"name": info.name, "analysis": info.analysis(), "url": info.more_info_url()}))
}

#[wasm_bindgen]
pub fn history_legend_html() -> String { legend_html() }

#[wasm_bindgen]
pub fn bias_class_color(value: Option<f64>) -> String { classify(value).color.to_string() }

/// Qualitative reading of a score for a metric (`eg`, `pb`, `mm`, `d2`, `overall`) and chamber.
#[wasm_bindgen]
pub fn lookup_bias(score: Option<f64>, metric: String, chamber: Option<String>) -> Result<JsValue, JsValue> {
    let metric: MetricKey = metric.parse().map_err(js_err)?;
    let chamber: Chamber = chamber.as_deref().unwrap_or("ushouse").parse().map_err(js_err)?;
    to_js(&lookup_bias_with(score, metric, &BiasScale::for_chart(chamber, metric)))
}
