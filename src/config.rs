//! Render configuration.
//!
//! Supports YAML configuration with precedence: CLI > file > defaults.
//!
//! ```yaml
//! pixels_wide: 64
//! scale: 8
//! background: [0.9, 0.9, 0.9]
//! format: png
//! ```

use crate::color::Color;
use crate::error::{Error, Result};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one rendering session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Grid side length in cells.
    #[serde(default = "default_pixels_wide")]
    pub pixels_wide: u32,

    /// Output pixels per cell side.
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Color shown for unset cells, components in `[0, 1]`.
    #[serde(default = "default_background")]
    pub background: [f32; 3],

    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_pixels_wide() -> u32 {
    64
}
fn default_scale() -> u32 {
    8
}
fn default_background() -> [f32; 3] {
    Color::BACKGROUND.to_array()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_wide: default_pixels_wide(),
            scale: default_scale(),
            background: default_background(),
            format: OutputFormat::default(),
        }
    }
}

impl RenderConfig {
    /// File name looked up under the platform config directory.
    pub const FILE_NAME: &'static str = "config.yaml";

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] with the offending line if parsing fails, or
    /// if the values do not pass [`RenderConfig::validate`].
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("using default config ({}): {e}", path.as_ref().display());
                Self::default()
            }
        }
    }

    /// `<config dir>/trueno-raster/config.yaml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trueno-raster").join(Self::FILE_NAME))
    }

    /// Reject settings no render can use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero grid size or scale, or a background
    /// component outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| Error::Config { line: 0, message: message.to_string() };

        if self.pixels_wide == 0 {
            return Err(invalid("pixels_wide must be positive"));
        }
        if self.scale == 0 {
            return Err(invalid("scale must be positive"));
        }
        if !self.background_color().is_normalized() {
            return Err(invalid("background components must lie in [0, 1]"));
        }
        Ok(())
    }

    /// Background as a [`Color`].
    #[must_use]
    pub fn background_color(&self) -> Color {
        Color::from_array(self.background)
    }
}
