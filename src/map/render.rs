use std::{io::Write, path::Path};

use anyhow::{Result, anyhow};
use geo::Rect;
use serde_json::{Map, Value, json};

use super::{DistrictGeometry, LegendEntry, district_style, map_legend, plan_viewport, popup_text};
use crate::display::DistrictColor;
use crate::io::svg::{Canvas, SvgStringWriter, SvgWriter, multipolygon_to_path, write_svg_footer, write_svg_header, write_svg_styles};
use crate::plan::Plan;

/// Side of a hatch pattern tile, in user-space units.
const PATTERN_SIZE: u32 = 24;

/// A scored plan joined with its district shapes.
pub struct DistrictMap<'a> {
    plan: &'a Plan,
    geometry: &'a DistrictGeometry,
}

impl<'a> DistrictMap<'a> {
    pub fn new(plan: &'a Plan, geometry: &'a DistrictGeometry) -> Self {
        if plan.districts().len() != geometry.len() {
            tracing::warn!(
                districts = plan.districts().len(),
                features = geometry.len(),
                "district count does not match feature count",
            );
        }
        Self { plan, geometry }
    }

    /// Initial extent for this plan's state.
    pub fn viewport(&self) -> Option<Rect<f64>> {
        let state = self.plan.model().and_then(|m| m.state.as_deref());
        plan_viewport(state, self.geometry)
    }

    #[inline] pub fn legend(&self) -> Vec<LegendEntry> { map_legend(self.plan) }

    /// Small wrapper with defaults.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        self.to_svg_with_size(path, 960, 10)
    }

    /// Write the map as a standalone SVG file.
    pub fn to_svg_with_size(&self, path: &Path, width: u32, margin: u32) -> Result<()> {
        let mut writer = SvgWriter::new(path)?;
        self.write_svg(&mut writer, width, margin)?;
        writer.flush()?;
        Ok(())
    }

    /// Render the map as an SVG string (browser use).
    pub fn to_svg_string(&self, width: u32, margin: u32) -> Result<String> {
        let mut writer = SvgStringWriter::new();
        self.write_svg(&mut writer, width, margin)?;
        writer.into_string()
    }

    fn write_svg<W: Write>(&self, writer: &mut W, width: u32, margin: u32) -> Result<()> {
        let bounds = self.viewport()
            .ok_or_else(|| anyhow!("[map::render] No geometry to draw"))?;
        let canvas = Canvas::fit(bounds, width as f64, margin as f64);

        let styles = (0..self.geometry.len())
            .map(|i| district_style(self.plan, i))
            .collect::<Vec<_>>();

        let mut used = Vec::new();
        for style in &styles {
            if style.color.is_patterned() && !used.contains(&style.color) { used.push(style.color) }
        }

        write_svg_header(writer, &canvas)?;
        write_svg_styles(writer, &pattern_defs(&used))?;

        for (i, (shape, style)) in self.geometry.shapes().iter().zip(&styles).enumerate() {
            if shape.0.is_empty() { continue }
            writeln!(writer,
                r#"<path class="district" data-index="{i}" d="{}" style="fill:{};stroke:{}"><title>{}</title></path>"#,
                multipolygon_to_path(shape, &canvas),
                style.fill(),
                style.color.hex(),
                popup_text(self.plan, i).replace("<br>", "\n"),
            )?;
        }

        write_legend(writer, &self.legend(), &canvas)?;
        write_svg_footer(writer)?;
        Ok(())
    }

    /// The district GeoJSON with per-feature style and popup properties added.
    pub fn styled_geojson(&self) -> Value {
        let features = self.geometry.features().iter()
            .enumerate()
            .map(|(i, feature)| {
                let style = district_style(self.plan, i);
                let mut feature = feature.clone();
                let mut properties = feature.get("properties")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_else(Map::new);

                properties.insert("index".into(), json!(i));
                properties.insert("popup".into(), json!(popup_text(self.plan, i)));
                properties.insert("color".into(), json!(style.color.hex()));
                properties.insert("fill".into(), json!(style.fill()));
                properties.insert("pattern".into(), json!(style.color.pattern_id()));
                properties.insert("weight".into(), json!(style.weight));
                properties.insert("fillOpacity".into(), json!(style.fill_opacity));

                if let Some(object) = feature.as_object_mut() {
                    object.insert("properties".into(), Value::Object(properties));
                }
                feature
            })
            .collect::<Vec<_>>();

        json!({"type": "FeatureCollection", "features": features})
    }
}

/// Hatch pattern definitions for the given colors.
pub fn pattern_defs(colors: &[DistrictColor]) -> String {
    let size = PATTERN_SIZE;
    colors.iter()
        .filter_map(|color| color.pattern_id().map(|id| (id, color.hex())))
        .map(|(id, hex)| format!(
            r##"<pattern id="{id}" width="{size}" height="{size}" patternUnits="userSpaceOnUse"><rect width="{size}" height="{size}" fill="{hex}"/><path d="M0,{size} L{size},0 M-6,6 L6,-6 M18,30 L30,18" stroke="#ffffff" stroke-width="4"/></pattern>
"##))
        .collect()
}

fn write_legend<W: Write>(writer: &mut W, entries: &[LegendEntry], canvas: &Canvas) -> Result<()> {
    let x = canvas.margin;
    for (row, entry) in entries.iter().enumerate() {
        let y = canvas.margin + row as f64 * 18.0;
        let fill = match entry.color.pattern_id() {
            Some(id) => format!("url(#{id})"),
            None => entry.color.hex().to_string(),
        };
        writeln!(writer,
            r#"<g class="{}"><rect x="{x:.0}" y="{y:.0}" width="12" height="12" style="fill:{fill}"/><text class="legend" x="{:.0}" y="{:.0}">{}</text></g>"#,
            entry.class, x + 18.0, y + 11.0, entry.label,
        )?;
    }
    Ok(())
}
