//! SVG writing for map export.

mod path;
mod writer;

pub use path::*;
pub use writer::*;
