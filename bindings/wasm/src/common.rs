use anyhow::{Result, anyhow};
use serde::Serialize;
use time::OffsetDateTime;
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize through a JSON string so maps arrive as plain JS objects.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(js_err)?;
    js_sys::JSON::parse(&json)
}

/// Site config from optional JSON text.
pub(crate) fn parse_config(config: Option<String>) -> Result<planscore_core::SiteConfig> {
    match config {
        Some(json) => planscore_core::SiteConfig::from_json_str(&json),
        None => Ok(planscore_core::SiteConfig::default()),
    }
}

/// `Date.now()` milliseconds as a timestamp.
pub(crate) fn from_js_millis(ms: f64) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos((ms * 1e6) as i128)
        .map_err(|e| anyhow!("invalid timestamp {ms}: {e}"))
}
