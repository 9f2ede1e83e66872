//! Terminal output encoder (ASCII/Unicode/ANSI).
//!
//! Renders pixel buffers to terminal-compatible text, one grid cell per
//! character column:
//! - ASCII: luminance ramp ` .:-=+*#%@`, unset cells are blank
//! - Unicode: half-block characters (▀) packing two rows per line
//! - ANSI: two-space blocks with 24-bit background color

use crate::color::{Color, Rgba};
use crate::framebuffer::PixelBuffer;
use std::fmt::Write as FmtWrite;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    Ascii,
    /// Unicode half-block characters (2x vertical resolution)
    #[default]
    UnicodeHalfBlock,
    /// Two-column blocks with ANSI 24-bit color
    AnsiTrueColor,
}

/// Terminal encoder configuration.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    background: Rgba,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// ASCII ramp from dark to light; index 0 is reserved for unset cells.
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { mode: TerminalMode::default(), background: Color::BACKGROUND.to_rgba() }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Color shown for unset cells in the color modes.
    #[must_use]
    pub fn background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Render a pixel buffer to a string.
    #[must_use]
    pub fn render(&self, buffer: &PixelBuffer) -> String {
        match self.mode {
            TerminalMode::Ascii => self.render_ascii(buffer),
            TerminalMode::UnicodeHalfBlock => self.render_unicode_half_block(buffer),
            TerminalMode::AnsiTrueColor => self.render_ansi_true_color(buffer),
        }
    }

    fn render_ascii(&self, buffer: &PixelBuffer) -> String {
        let w = buffer.pixels_wide();
        let mut output = String::with_capacity((w as usize + 1) * w as usize);

        for y in 0..w {
            for &cell in buffer.row(y).unwrap_or_default() {
                let ch = cell.map_or(Self::ASCII_RAMP[0], |c| Self::ASCII_RAMP[luma_to_index(c)]);
                output.push(ch);
            }
            output.push('\n');
        }

        output
    }

    /// Each character covers two vertically adjacent cells: ▀ painted with the
    /// top cell as foreground and the bottom cell as background.
    fn render_unicode_half_block(&self, buffer: &PixelBuffer) -> String {
        let w = buffer.pixels_wide();
        let mut output = String::with_capacity((w as usize * 40 + 5) * (w as usize).div_ceil(2));

        for y in (0..w).step_by(2) {
            for x in 0..w {
                let top = self.cell_rgba(buffer, x, y);
                let bottom = self.cell_rgba(buffer, x, y + 1);

                // ▀ U+2580 = upper half block
                let _ = write!(
                    output,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                );
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    fn render_ansi_true_color(&self, buffer: &PixelBuffer) -> String {
        let w = buffer.pixels_wide();
        let mut output = String::with_capacity((w as usize * 22 + 5) * w as usize);

        for y in 0..w {
            for x in 0..w {
                let c = self.cell_rgba(buffer, x, y);
                // Two spaces keep cells roughly square in a monospace font.
                let _ = write!(output, "\x1b[48;2;{};{};{}m  ", c.r, c.g, c.b);
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    /// Cell color, the background for unset or out-of-range cells.
    fn cell_rgba(&self, buffer: &PixelBuffer, x: u32, y: u32) -> Rgba {
        buffer
            .get(i64::from(x), i64::from(y))
            .ok()
            .flatten()
            .map_or(self.background, Color::to_rgba)
    }
}

/// Map a color's Rec. 709 luminance to a non-blank ramp index (1..=9).
fn luma_to_index(color: Color) -> usize {
    let luma = 0.2126 * color.r + 0.7152 * color.g + 0.0722 * color.b;
    let steps = (TerminalEncoder::ASCII_RAMP.len() - 2) as f32;
    1 + (luma.clamp(0.0, 1.0) * steps).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(cells: &[(i64, i64, Color)]) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(4).expect("buffer creation should succeed");
        for &(x, y, c) in cells {
            buffer.set(x, y, c).expect("cell should be in bounds");
        }
        buffer
    }

    #[test]
    fn test_ascii_unset_is_blank_black_is_not() {
        let buffer = buffer_with(&[(0, 0, Color::BLACK), (3, 3, Color::WHITE)]);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).render(&buffer);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], ".   ");
        assert_eq!(lines[1], "    ");
        assert_eq!(lines[3], "   @");
    }

    #[test]
    fn test_unicode_half_block_contains_ansi() {
        let buffer = buffer_with(&[(0, 0, Color::RED)]);
        let output =
            TerminalEncoder::new().mode(TerminalMode::UnicodeHalfBlock).render(&buffer);

        assert!(output.contains("\x1b[38;2;255;0;0m"));
        assert!(output.contains('▀'));
        assert!(output.contains("\x1b[0m"));
        // 4 rows packed two per line
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_ansi_true_color_background_for_unset() {
        let buffer = buffer_with(&[(1, 0, Color::BLUE)]);
        let output = TerminalEncoder::new()
            .mode(TerminalMode::AnsiTrueColor)
            .background(Rgba::rgb(1, 2, 3))
            .render(&buffer);

        assert!(output.contains("48;2;0;0;255"));
        assert!(output.contains("48;2;1;2;3"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn test_odd_size_half_block() {
        let buffer = PixelBuffer::new(3).expect("buffer creation should succeed");
        let output = TerminalEncoder::new().render(&buffer);
        assert_eq!(output.lines().count(), 2);
    }
}
