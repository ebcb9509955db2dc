//! District geometry decoding from the scoring service's GeoJSON.

use anyhow::{Context, Result, anyhow, ensure};
use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect};
use serde_json::Value;

/// Feature shapes of a district GeoJSON, index-aligned with the plan's districts.
#[derive(Clone, Debug, Default)]
pub struct DistrictGeometry {
    shapes: Vec<MultiPolygon<f64>>,
    features: Vec<Value>,
}

impl DistrictGeometry {
    #[inline] pub fn len(&self) -> usize { self.shapes.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    #[inline] pub fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    /// Raw feature objects, in document order.
    #[inline] pub fn features(&self) -> &[Value] { &self.features }

    /// Bounding box covering every feature, `None` when there is no geometry.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.shapes.iter()
            .filter_map(|shape| shape.bounding_rect())
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
    }
}

/// Decode a GeoJSON FeatureCollection (or bare geometry list) of districts.
///
/// Features with a Polygon or MultiPolygon geometry are kept; a null geometry
/// becomes an empty shape so that indices still line up with the districts.
pub fn read_district_geojson(bytes: &[u8]) -> Result<DistrictGeometry> {
    let json: Value = serde_json::from_slice(bytes)
        .context("[map::geojson] Failed to parse GeoJSON")?;
    district_geometry_from_value(json)
}

/// Same as [`read_district_geojson`] for an already-parsed document.
pub fn district_geometry_from_value(json: Value) -> Result<DistrictGeometry> {
    let features = match json.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => json.get("features")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| anyhow!("[map::geojson] FeatureCollection has no features array"))?,
        Some("Feature") => vec![json],
        other => return Err(anyhow!("[map::geojson] Unsupported GeoJSON type: {other:?}")),
    };

    let shapes = features.iter()
        .enumerate()
        .map(|(i, feature)| {
            parse_feature_geometry(feature)
                .with_context(|| format!("[map::geojson] Invalid geometry in feature {i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(features = shapes.len(), "decoded district geometry");
    Ok(DistrictGeometry { shapes, features })
}

fn parse_feature_geometry(feature: &Value) -> Result<MultiPolygon<f64>> {
    let Some(geometry) = feature.get("geometry").filter(|g| !g.is_null()) else {
        return Ok(MultiPolygon(vec![]));
    };

    let coords = geometry.get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("geometry has no coordinates array"))?;

    match geometry.get("type").and_then(Value::as_str) {
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon_coords(coords)?])),
        Some("MultiPolygon") => coords.iter()
            .map(|poly| {
                let rings = poly.as_array().ok_or_else(|| anyhow!("polygon must be an array of rings"))?;
                parse_polygon_coords(rings)
            })
            .collect::<Result<Vec<_>>>()
            .map(MultiPolygon),
        other => Err(anyhow!("unsupported geometry type: {other:?}")),
    }
}

/// Parse `[exterior, hole, hole, ...]`.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    ensure!(!rings.is_empty(), "polygon has no rings");

    let mut parsed = rings.iter()
        .map(|ring| {
            let points = ring.as_array().ok_or_else(|| anyhow!("ring must be an array of positions"))?;
            parse_ring_coords(points)
        })
        .collect::<Result<Vec<_>>>()?;

    let exterior = parsed.remove(0);
    Ok(Polygon::new(exterior, parsed))
}

/// Parse `[[x, y], [x, y], ...]`, closing the ring when needed.
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len() + 1);

    for position in coords {
        let pair = position.as_array().filter(|p| p.len() >= 2)
            .ok_or_else(|| anyhow!("position must have at least two numbers"))?;
        let x = pair[0].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
        let y = pair[1].as_f64().ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }

    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last { points.push(first); }
    }

    Ok(LineString(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [2, 0], [2, 1], [0, 1]]]
                }},
                {"type": "Feature", "properties": {}, "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[3, 0], [4, 0], [4, 1], [3, 0]]],
                        [[[5, -1], [6, -1], [6, 3], [5, -1]], [[5.5, 0], [5.8, 0], [5.8, 1], [5.5, 0]]]
                    ]
                }},
                {"type": "Feature", "properties": {}, "geometry": null}
            ]
        })
    }

    #[test]
    fn decodes_polygons_and_multipolygons() {
        let geometry = district_geometry_from_value(collection()).unwrap();
        assert_eq!(geometry.len(), 3);
        assert_eq!(geometry.shapes()[0].0.len(), 1);
        assert_eq!(geometry.shapes()[0].0[0].exterior().0.len(), 5, "ring is closed");
        assert_eq!(geometry.shapes()[1].0.len(), 2);
        assert_eq!(geometry.shapes()[1].0[1].interiors().len(), 1);
        assert!(geometry.shapes()[2].0.is_empty());
    }

    #[test]
    fn bounds_cover_all_features() {
        let geometry = district_geometry_from_value(collection()).unwrap();
        let bounds = geometry.bounds().unwrap();
        assert_eq!(bounds.min(), Coord { x: 0.0, y: -1.0 });
        assert_eq!(bounds.max(), Coord { x: 6.0, y: 3.0 });
    }

    #[test]
    fn rejects_other_geometry() {
        let doc = json!({"type": "FeatureCollection", "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}}
        ]});
        let err = district_geometry_from_value(doc).unwrap_err();
        assert!(format!("{err:#}").contains("feature 0"));
    }

    #[test]
    fn reads_bytes() {
        let bytes = serde_json::to_vec(&collection()).unwrap();
        assert_eq!(read_district_geojson(&bytes).unwrap().len(), 3);
        assert!(read_district_geojson(b"not json").is_err());
    }
}
