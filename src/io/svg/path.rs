use geo::{CoordsIter, LineString, MultiPolygon};

use super::Canvas;

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub fn multipolygon_to_path(shape: &MultiPolygon<f64>, canvas: &Canvas) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), canvas));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, canvas));
        }
    }

    out.trim_start().to_string()
}

/// Build a compact SVG path string for a LineString (ring).
fn ring_to_path(ring: &LineString<f64>, canvas: &Canvas) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter()
        .map(|coord| canvas.project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }

    out
}
