//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate. Each set cell becomes a
//! `scale x scale` block of its exact color; unset cells show the background.

use crate::color::{Color, Rgba};
use crate::error::{Error, Result};
use crate::framebuffer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for pixel buffer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngEncoder {
    scale: u32,
    background: Rgba,
}

impl Default for PngEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PngEncoder {
    /// Default export file name.
    pub const DEFAULT_FILE_NAME: &'static str = "image.png";

    /// One image pixel per cell over the light-gray background.
    #[must_use]
    pub fn new() -> Self {
        Self { scale: 1, background: Color::BACKGROUND.to_rgba() }
    }

    /// Image pixels per cell side (at least 1).
    #[must_use]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Color shown for unset cells. Use [`Rgba::TRANSPARENT`] for a
    /// transparent background.
    #[must_use]
    pub fn background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Side length of the encoded image in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if the scaled side overflows `u32`.
    pub fn image_side(&self, buffer: &PixelBuffer) -> Result<u32> {
        buffer
            .pixels_wide()
            .checked_mul(self.scale)
            .ok_or(Error::InvalidSize { pixels_wide: buffer.pixels_wide() })
    }

    /// Tightly packed RGBA8 pixels of the scaled image, row-major.
    pub fn to_rgba_pixels(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let side = self.image_side(buffer)? as usize;
        let scale = self.scale as usize;

        let mut pixels = self.background.to_array().repeat(side * side);

        for (x, y, color) in buffer.iter_set_pixels() {
            let rgba = color.to_rgba().to_array();
            for row in 0..scale {
                let start = ((y as usize * scale + row) * side + x as usize * scale) * 4;
                for chunk in pixels[start..start + scale * 4].chunks_exact_mut(4) {
                    chunk.copy_from_slice(&rgba);
                }
            }
        }

        Ok(pixels)
    }

    fn encode<W: Write>(&self, buffer: &PixelBuffer, writer: W) -> Result<()> {
        let side = self.image_side(buffer)?;

        let mut encoder = png::Encoder::new(writer, side, side);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.to_rgba_pixels(buffer)?)?;

        Ok(())
    }

    /// Write a pixel buffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, buffer: &PixelBuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.encode(buffer, BufWriter::new(file))
    }

    /// Encode a pixel buffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.encode(buffer, &mut bytes)?;
        Ok(bytes)
    }
}
