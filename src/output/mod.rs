//! Output encoders (PNG, SVG, terminal) and the displays built on them.
//!
//! A [`Display`] receives the finished pixel buffer once per render cycle.
//! Rasterization never depends on which display is attached.

mod png_encoder;
mod svg;
mod terminal;

pub use png_encoder::PngEncoder;
pub use svg::{SvgElement, SvgEncoder};
pub use terminal::{TerminalEncoder, TerminalMode};

use crate::error::{Error, Result};
use crate::framebuffer::PixelBuffer;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Presents a finished pixel buffer.
pub trait Display {
    /// Show or export the buffer contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn present(&mut self, buffer: &PixelBuffer) -> Result<()>;
}

impl<D: Display + ?Sized> Display for &mut D {
    fn present(&mut self, buffer: &PixelBuffer) -> Result<()> {
        (**self).present(buffer)
    }
}

impl<D: Display + ?Sized> Display for Box<D> {
    fn present(&mut self, buffer: &PixelBuffer) -> Result<()> {
        (**self).present(buffer)
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// PNG image
    #[default]
    Png,
    /// SVG document
    Svg,
    /// ANSI true-color text on a terminal
    Terminal,
}

impl OutputFormat {
    /// Guess the format from a file extension (`.png`, `.svg`).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "terminal" | "term" => Ok(Self::Terminal),
            other => Err(Error::Config {
                line: 0,
                message: format!("unknown output format '{other}' (expected png, svg or terminal)"),
            }),
        }
    }
}

/// Writes each presented buffer to an image file, replacing it.
#[derive(Debug, Clone)]
pub struct ImageExport {
    path: PathBuf,
    format: OutputFormat,
    png: PngEncoder,
    svg: SvgEncoder,
}

impl Default for ImageExport {
    fn default() -> Self {
        Self::new(PngEncoder::DEFAULT_FILE_NAME)
    }
}

impl ImageExport {
    /// Export to `path`, format taken from its extension (PNG if unknown).
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let format = OutputFormat::from_path(&path).unwrap_or_default();
        Self { path, format, png: PngEncoder::new(), svg: SvgEncoder::new() }
    }

    /// Force the file format.
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Encoder used for PNG output.
    #[must_use]
    pub fn png(mut self, png: PngEncoder) -> Self {
        self.png = png;
        self
    }

    /// Encoder used for SVG output.
    #[must_use]
    pub fn svg(mut self, svg: SvgEncoder) -> Self {
        self.svg = svg;
        self
    }

    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Display for ImageExport {
    fn present(&mut self, buffer: &PixelBuffer) -> Result<()> {
        log::debug!("exporting {:?} to {}", self.format, self.path.display());
        match self.format {
            OutputFormat::Svg => self.svg.write_to_file(buffer, &self.path),
            // Terminal output has no file form; fall back to PNG.
            OutputFormat::Png | OutputFormat::Terminal => self.png.write_to_file(buffer, &self.path),
        }
    }
}

/// Writes each presented buffer as terminal text.
#[derive(Debug)]
pub struct TerminalDisplay<W: Write> {
    encoder: TerminalEncoder,
    writer: W,
}

impl TerminalDisplay<io::Stdout> {
    /// Half-block true-color output on stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Half-block true-color output on `writer`.
    pub fn new(writer: W) -> Self {
        Self { encoder: TerminalEncoder::new(), writer }
    }

    /// Replace the encoder.
    #[must_use]
    pub fn encoder(mut self, encoder: TerminalEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn present(&mut self, buffer: &PixelBuffer) -> Result<()> {
        self.writer.write_all(self.encoder.render(buffer).as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_path(Path::new("out.svg")), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_path(Path::new("out.txt")), None);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert_eq!(" Terminal ".parse::<OutputFormat>().unwrap(), OutputFormat::Terminal);
        assert!("jpeg".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_image_export_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.svg");
        let mut buffer = PixelBuffer::new(3).unwrap();
        buffer.set(2, 1, Color::RED).unwrap();

        let mut export = ImageExport::new(&path);
        export.present(&buffer).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(r#"<rect x="2" y="1""#));
    }

    #[test]
    fn test_image_export_default_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PngEncoder::DEFAULT_FILE_NAME);
        let buffer = PixelBuffer::new(3).unwrap();

        ImageExport::new(&path).present(&buffer).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(ImageExport::default().path(), Path::new("image.png"));
    }

    #[test]
    fn test_terminal_display_writes() {
        let mut buffer = PixelBuffer::new(2).unwrap();
        buffer.set(0, 0, Color::GREEN).unwrap();

        let mut display = TerminalDisplay::new(Vec::new());
        display.present(&buffer).unwrap();

        let text = String::from_utf8(display.into_inner()).unwrap();
        assert!(text.contains("38;2;0;255;0"));
    }

    #[test]
    fn test_boxed_display() {
        let buffer = PixelBuffer::new(2).unwrap();
        let mut display: Box<dyn Display> = Box::new(TerminalDisplay::new(Vec::new()));
        assert!(display.present(&buffer).is_ok());
    }
}
