//! SVG output encoder.
//!
//! Vector mode emits one `<rect>` per set cell, the literal form of "a unit
//! square at the cell's position in its exact color". Raster mode embeds the
//! PNG encoding as a base64 data URI instead.

use crate::color::{Color, Rgba};
use crate::error::Result;
use crate::framebuffer::PixelBuffer;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::PngEncoder;

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Filled rectangle
    Rect { x: u32, y: u32, width: u32, height: u32, fill: Rgba },
    /// Embedded raster image (data URI)
    Image { width: u32, height: u32, data: String },
}

/// SVG encoder for pixel buffer output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// Image units per cell side.
    scale: u32,
    /// Background color (None for transparent).
    background: Option<Rgba>,
    /// Embed a PNG instead of emitting one rect per cell.
    raster: bool,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgEncoder {
    /// Vector output, one unit per cell, light-gray background.
    #[must_use]
    pub fn new() -> Self {
        Self { scale: 1, background: Some(Color::BACKGROUND.to_rgba()), raster: false }
    }

    /// Image units per cell side (at least 1).
    #[must_use]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Embed the buffer as a PNG image rather than per-cell rects.
    #[must_use]
    pub fn raster(mut self, raster: bool) -> Self {
        self.raster = raster;
        self
    }

    /// The elements that make up the document body, in row-major cell order.
    ///
    /// # Errors
    ///
    /// Returns an error if raster mode is on and PNG encoding fails.
    pub fn elements(&self, buffer: &PixelBuffer) -> Result<Vec<SvgElement>> {
        let side = buffer.pixels_wide().saturating_mul(self.scale);

        if self.raster {
            let png = PngEncoder::new()
                .scale(self.scale)
                .background(self.background.unwrap_or(Rgba::TRANSPARENT))
                .to_bytes(buffer)?;
            let data = format!("data:image/png;base64,{}", STANDARD.encode(&png));
            return Ok(vec![SvgElement::Image { width: side, height: side, data }]);
        }

        Ok(buffer
            .iter_set_pixels()
            .map(|(x, y, color)| SvgElement::Rect {
                x: x * self.scale,
                y: y * self.scale,
                width: self.scale,
                height: self.scale,
                fill: color.to_rgba(),
            })
            .collect())
    }

    /// Render to SVG string.
    ///
    /// # Errors
    ///
    /// Returns an error if raster mode is on and PNG encoding fails.
    pub fn render(&self, buffer: &PixelBuffer) -> Result<String> {
        let side = buffer.pixels_wide().saturating_mul(self.scale);
        let mut svg = String::with_capacity(4096);

        // SVG header
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{side}" height="{side}" viewBox="0 0 {side} {side}" shape-rendering="crispEdges">"#
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in self.elements(buffer)? {
            let _ = writeln!(svg, "  {}", element_to_svg(&element));
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, buffer: &PixelBuffer, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render(buffer)?.as_bytes())?;
        Ok(())
    }
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill } => format!(
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"/>"#,
            fill.to_css()
        ),
        SvgElement::Image { width, height, data } => {
            format!(r#"<image width="{width}" height="{height}" href="{data}"/>"#)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_per_set_cell() {
        let mut buffer = PixelBuffer::new(4).unwrap();
        buffer.set(1, 2, Color::RED).unwrap();
        buffer.set(3, 0, Color::BLACK).unwrap();

        let svg = SvgEncoder::new().scale(10).render(&buffer).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="40""#));
        assert!(svg.contains(r#"<rect x="10" y="20" width="10" height="10" fill="rgb(255,0,0)"/>"#));
        assert!(svg.contains(r#"<rect x="30" y="0" width="10" height="10" fill="rgb(0,0,0)"/>"#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_elements_row_major() {
        let mut buffer = PixelBuffer::new(2).unwrap();
        buffer.set(1, 1, Color::GREEN).unwrap();
        buffer.set(0, 1, Color::BLUE).unwrap();

        let elements = SvgEncoder::new().elements(&buffer).unwrap();
        assert_eq!(
            elements,
            vec![
                SvgElement::Rect { x: 0, y: 1, width: 1, height: 1, fill: Rgba::rgb(0, 0, 255) },
                SvgElement::Rect { x: 1, y: 1, width: 1, height: 1, fill: Rgba::rgb(0, 255, 0) },
            ]
        );
    }

    #[test]
    fn test_transparent_background() {
        let buffer = PixelBuffer::new(2).unwrap();
        let svg = SvgEncoder::new().background(None).render(&buffer).unwrap();
        assert!(!svg.contains("100%"));
    }

    #[test]
    fn test_raster_mode_embeds_png() {
        let mut buffer = PixelBuffer::new(2).unwrap();
        buffer.set(0, 0, Color::RED).unwrap();

        let svg = SvgEncoder::new().raster(true).render(&buffer).unwrap();
        assert!(svg.contains("data:image/png;base64,"));
        assert!(!svg.contains("<rect x="));
    }
}
