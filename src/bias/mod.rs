//! Partisan bias scores: qualitative descriptions and gradient colors.

mod gradient;
mod lookup;

pub use gradient::{BIAS_STOPS, COMPACT_GRADIENT_STEPS, GRADIENT_STEPS, Rgb, bias_gradient, gradient};
pub use lookup::*;
