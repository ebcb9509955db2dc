use time::OffsetDateTime;
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use planscore_core::{
    Plan,
    client::{MessageLog, PollPage, parse_last_modified},
    display::{metrics_table, plan_array, score_cards, seat_share_array, sensitivity, which_district_color},
    plan::{plan_headings, preread_description},
};

use crate::common::*;

#[wasm_bindgen]
pub struct WasmPlan {
    inner: Plan,
    modified_at: Option<OffsetDateTime>,
}

#[wasm_bindgen]
impl WasmPlan {
    /// Decode a scoring document; `last_modified` is the response's `Last-Modified` header.
    #[wasm_bindgen(constructor)]
    pub fn new(json: String, last_modified: Option<String>) -> Result<WasmPlan, JsValue> {
        let plan = Plan::from_json_str(&json).map_err(js_err)?.with_derived_geometry_key();
        let modified_at = last_modified.as_deref().and_then(parse_last_modified);
        Ok(WasmPlan { inner: plan, modified_at })
    }

    pub(crate) fn inner(&self) -> &Plan { &self.inner }

    /// Whether the score page can stop polling.
    pub fn is_scored(&self) -> bool { PollPage::Score.is_done(&self.inner) }

    /// Whether the preread page can stop polling.
    pub fn is_read(&self) -> bool { PollPage::Preread.is_done(&self.inner) }

    /// Processing message to show while polling.
    pub fn message(&self) -> Option<String> { self.inner.message().map(str::to_string) }

    pub fn geometry_key(&self) -> Option<String> { self.inner.geometry_key().map(str::to_string) }

    pub fn districts_count(&self) -> Option<usize> { self.inner.districts_count() }

    /// Description, upload time and place headings; `now_ms` is `Date.now()`.
    pub fn headings(&self, now_ms: f64) -> Result<JsValue, JsValue> {
        let now = from_js_millis(now_ms).map_err(js_err)?;
        to_js(&plan_headings(&self.inner, self.modified_at, now))
    }

    pub fn preread_description(&self, now_ms: f64) -> Result<String, JsValue> {
        let now = from_js_millis(now_ms).map_err(js_err)?;
        Ok(preread_description(&self.inner, self.modified_at, now))
    }

    /// District table HTML, empty when the plan has no districts.
    pub fn table_html(&self) -> String {
        plan_array(&self.inner).map(|t| t.to_html()).unwrap_or_default()
    }

    /// District table as `{head, rows, ...}`.
    pub fn table(&self) -> Result<JsValue, JsValue> {
        to_js(&plan_array(&self.inner))
    }

    /// Hex color per district, in district order.
    pub fn district_colors(&self) -> Result<JsValue, JsValue> {
        let colors = self.inner.districts().iter()
            .map(|d| which_district_color(d, &self.inner).hex())
            .collect::<Vec<_>>();
        serde_wasm_bindgen::to_value(&colors).map_err(|e| e.into())
    }

    /// Score cards; `config` is optional site config JSON.
    pub fn score_cards(&self, config: Option<String>, show_all: bool) -> Result<JsValue, JsValue> {
        let config = parse_config(config).map_err(js_err)?;
        to_js(&score_cards(&self.inner, &config.metric_urls, show_all))
    }

    pub fn metrics_table_html(&self, config: Option<String>, show_all: bool) -> Result<String, JsValue> {
        let config = parse_config(config).map_err(js_err)?;
        Ok(metrics_table(&self.inner, &config.metric_urls, show_all).map(|t| t.to_html()).unwrap_or_default())
    }

    pub fn seat_share_html(&self, config: Option<String>) -> Result<String, JsValue> {
        let config = parse_config(config).map_err(js_err)?;
        Ok(seat_share_array(&self.inner).map(|s| s.to_html(&config.images)).unwrap_or_default())
    }

    /// Efficiency gap by swing, or `null`.
    pub fn sensitivity(&self) -> Result<JsValue, JsValue> {
        to_js(&sensitivity(&self.inner))
    }
}

/// Collapse a sequence of polling messages the way the page shows them.
#[wasm_bindgen]
pub fn collapse_messages(messages: Vec<String>) -> Vec<String> {
    let mut log = MessageLog::default();
    for message in &messages { log.show(message); }
    log.lines().to_vec()
}
