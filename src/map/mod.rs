//! Plan maps: district GeoJSON, per-district styling, initial viewport, legend
//! and SVG / styled-GeoJSON output.

mod geojson;
mod legend;
mod render;
mod style;
mod viewport;

pub use geojson::*;
pub use legend::*;
pub use render::*;
pub use style::*;
pub use viewport::*;
