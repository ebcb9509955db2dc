//! Format-specific reading and writing: bias CSV tables and SVG map export.
//!
//! GeoJSON decoding lives in `map::geojson` next to the district styling it feeds.

pub mod csv;
pub mod svg;
