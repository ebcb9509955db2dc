use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use planscore_core::map::{DistrictGeometry, DistrictMap, legend_html, read_district_geojson};

use crate::{WasmPlan, common::*};

#[wasm_bindgen]
pub struct WasmDistrictMap {
    geometry: DistrictGeometry,
}

#[wasm_bindgen]
impl WasmDistrictMap {
    /// Decode district GeoJSON text.
    #[wasm_bindgen(constructor)]
    pub fn new(geojson: String) -> Result<WasmDistrictMap, JsValue> {
        let geometry = read_district_geojson(geojson.as_bytes()).map_err(js_err)?;
        Ok(WasmDistrictMap { geometry })
    }

    pub fn len(&self) -> usize { self.geometry.len() }

    /// Generate SVG text colored by `plan`.
    #[wasm_bindgen(js_name = "to_svg")]
    pub fn to_svg(&self, plan: &WasmPlan, width: u32, margin: u32) -> Result<String, JsValue> {
        self.warn_on_mismatch(plan);
        DistrictMap::new(plan.inner(), &self.geometry).to_svg_string(width, margin).map_err(js_err)
    }

    /// GeoJSON with `color`, `fill`, `weight`, `fillOpacity` and `popup` properties per feature.
    #[wasm_bindgen(js_name = "to_geojson")]
    pub fn to_geojson(&self, plan: &WasmPlan) -> Result<JsValue, JsValue> {
        self.warn_on_mismatch(plan);
        to_js(&DistrictMap::new(plan.inner(), &self.geometry).styled_geojson())
    }

    /// Initial extent as `[[south, west], [north, east]]`, or `null`.
    pub fn viewport(&self, plan: &WasmPlan) -> Result<JsValue, JsValue> {
        let bounds = DistrictMap::new(plan.inner(), &self.geometry).viewport()
            .map(|r| [[r.min().y, r.min().x], [r.max().y, r.max().x]]);
        to_js(&bounds)
    }

    pub fn legend_html(&self, plan: &WasmPlan) -> String {
        legend_html(&DistrictMap::new(plan.inner(), &self.geometry).legend())
    }

    fn warn_on_mismatch(&self, plan: &WasmPlan) {
        let districts = plan.inner().districts().len();
        if districts != self.geometry.len() {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "{districts} districts but {} map features", self.geometry.len(),
            )));
        }
    }
}
