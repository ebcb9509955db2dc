//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

pub struct SvgWriter {
    writer: BufWriter<File>
}

/// String-based SVG writer for WASM/browser use
#[derive(Default)]
pub struct SvgStringWriter {
    buffer: Vec<u8>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

impl SvgStringWriter {
    pub fn new() -> Self { Self::default() }

    /// Get the SVG string
    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }
}

impl SvgWriter {
    /// Create a new SVG writer to a file path
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[io::svg] Failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }
}

/// Placement of lon/lat bounds on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub scale: f64,
    pub bounds: geo::Rect<f64>,
}

impl Canvas {
    /// Fit `bounds` into `width` pixels, preserving aspect.
    pub fn fit(bounds: geo::Rect<f64>, width: f64, margin: f64) -> Self {
        let span = if bounds.width() > 0.0 { bounds.width() } else { bounds.height().max(1.0) };
        let scale = (width - 2.0 * margin) / span;
        let height = bounds.height() * scale + 2.0 * margin;
        Self { width, height, margin, scale, bounds }
    }

    /// Map lon/lat to SVG coordinates (Y down).
    pub fn project(&self, coord: &geo::Coord<f64>) -> (f64, f64) {
        let x = self.margin + (coord.x - self.bounds.min().x) * self.scale;
        let y = self.margin + (self.bounds.max().y - coord.y) * self.scale;
        (x, y)
    }
}

/// Write the XML declaration and opening `<svg>` tag.
pub fn write_svg_header<W: Write>(writer: &mut W, canvas: &Canvas) -> Result<()> {
    let Canvas { width, height, margin, scale, bounds } = *canvas;
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.3} {height:.3}" data-lon-min="{lon_min}" data-lon-max="{lon_max}" data-lat-min="{lat_min}" data-lat-max="{lat_max}" data-margin="{margin}" data-scale="{scale}">"##,
        lon_min = bounds.min().x,
        lon_max = bounds.max().x,
        lat_min = bounds.min().y,
        lat_max = bounds.max().y,
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// Write the `<defs>` block: district styles plus any extra definitions (patterns).
pub fn write_svg_styles<W: Write>(writer: &mut W, extra_defs: &str) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .district {{ stroke: #ffffff; stroke-width: 2; fill-opacity: 0.5; vector-effect: non-scaling-stroke; }}
    .legend {{ font: 12px sans-serif; fill: #111827; }}
</style>
{extra_defs}</defs>"##)?;
    Ok(())
}

/// Write the closing `</svg>` tag.
pub fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}
