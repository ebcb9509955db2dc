//! Color gradient for partisan bias scores.

use std::{fmt, sync::LazyLock};

use anyhow::{Result, ensure};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        ensure!(digits.len() == 6 && digits.is_ascii(), "[bias::gradient] Expected #RRGGBB, got {hex:?}");
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }

    /// Linear interpolation towards `other`, `t` in [0, 1].
    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Rgb { r: mix(self.r, other.r), g: mix(self.g, other.g), b: mix(self.b, other.b) }
    }
}

impl fmt::Display for Rgb {
    /// Format as lowercase CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Republican red through a neutral lavender to Democratic blue.
pub const BIAS_STOPS: [Rgb; 3] = [
    Rgb::new(0xC7, 0x1C, 0x36),
    Rgb::new(0xF2, 0xE5, 0xFA),
    Rgb::new(0x00, 0x49, 0xA8),
];

/// Stops in the full-size gradient.
pub const GRADIENT_STEPS: usize = 100;

/// Stops in the gradient used by compact legends.
pub const COMPACT_GRADIENT_STEPS: usize = 30;

/// `n` evenly spaced colors along the piecewise-linear path through `stops`.
pub fn gradient(stops: &[Rgb], n: usize) -> Vec<Rgb> {
    match (stops, n) {
        ([], _) | (_, 0) => Vec::new(),
        ([only], _) => vec![*only; n],
        (_, 1) => vec![stops[0]],
        _ => {
            let segments = (stops.len() - 1) as f64;
            (0..n).map(|i| {
                let pos = i as f64 / (n - 1) as f64 * segments;
                let seg = (pos.floor() as usize).min(stops.len() - 2);
                stops[seg].lerp(stops[seg + 1], pos - seg as f64)
            }).collect()
        }
    }
}

pub(crate) static BIAS_GRADIENT: LazyLock<Vec<String>> =
    LazyLock::new(|| gradient(&BIAS_STOPS, GRADIENT_STEPS).iter().map(Rgb::to_string).collect());

pub(crate) static COMPACT_BIAS_GRADIENT: LazyLock<Vec<String>> =
    LazyLock::new(|| gradient(&BIAS_STOPS, COMPACT_GRADIENT_STEPS).iter().map(Rgb::to_string).collect());

/// Precomputed hex gradient with `steps` stops; the two standard sizes are cached.
pub fn bias_gradient(steps: usize) -> std::borrow::Cow<'static, [String]> {
    match steps {
        GRADIENT_STEPS => BIAS_GRADIENT.as_slice().into(),
        COMPACT_GRADIENT_STEPS => COMPACT_BIAS_GRADIENT.as_slice().into(),
        n => gradient(&BIAS_STOPS, n).iter().map(Rgb::to_string).collect::<Vec<_>>().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_the_stops() {
        let colors = gradient(&BIAS_STOPS, GRADIENT_STEPS);
        assert_eq!(colors.len(), 100);
        assert_eq!(colors[0].to_string(), "#c71c36");
        assert_eq!(colors[99].to_string(), "#0049a8");
    }

    #[test]
    fn odd_lengths_hit_the_middle_stop() {
        let colors = gradient(&BIAS_STOPS, 5);
        assert_eq!(colors[2], BIAS_STOPS[1]);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#F2E5FA").unwrap(), BIAS_STOPS[1]);
        assert!(Rgb::from_hex("#F2E5").is_err());
        assert!(Rgb::from_hex("#GGGGGG").is_err());
    }

    #[test]
    fn cached_sizes() {
        assert_eq!(bias_gradient(30).len(), 30);
        assert_eq!(bias_gradient(7).len(), 7);
    }
}
