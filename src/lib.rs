//! # Trueno-Raster
//!
//! Software rasterizer for a tiny scene-description language.
//!
//! A scene declares colored vertices and draws points, lines and filled
//! triangles over them. Trueno-raster parses the text, rasterizes every
//! primitive onto a square grid of optional colors, and hands the grid to a
//! pluggable display (PNG, SVG, terminal, or the browser via WASM).
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_raster::prelude::*;
//!
//! let mut buffer = PixelBuffer::new(8).unwrap();
//! render_scene(
//!     &mut buffer,
//!     "v,0,0,1,0,0; v,8,0,0,1,0; v,0,8,0,0,1; t,0,1,2;",
//! )
//! .unwrap();
//!
//! let png = PngEncoder::new().scale(4).to_bytes(&buffer).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```
//!
//! ## Feature Flags
//!
//! - `config`: YAML render configuration (`serde`, `serde_yaml_ng`, `dirs`)
//! - `cli`: the `trueno-raster` command-line tool (implies `config`)
//! - `wasm`: WebAssembly bindings
//!
//! ## Academic References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Pineda, J. (1988). "A Parallel Algorithm for Polygon Rasterization." SIGGRAPH '88.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types.
pub mod color;

/// Square pixel buffer of optional colors.
pub mod framebuffer;

/// Geometric primitives (points, vertices, lines, triangles).
pub mod geometry;

// ============================================================================
// Scene Modules
// ============================================================================

/// Scene description language: parsing and draw order.
pub mod scene;

/// Rasterization of points, lines and triangles.
pub mod render;

// ============================================================================
// Output Modules
// ============================================================================

/// Output encoders (PNG, SVG, terminal) and displays.
pub mod output;

/// Render-cycle driver.
pub mod renderer;

// ============================================================================
// Optional Modules
// ============================================================================

/// YAML render configuration.
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub mod config;

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Color, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::PixelBuffer;
    pub use crate::geometry::{Line, Point, Triangle, Vertex};
    pub use crate::output::{
        Display, ImageExport, OutputFormat, PngEncoder, SvgEncoder, TerminalDisplay,
        TerminalEncoder, TerminalMode,
    };
    pub use crate::render::{Drawable, Rasterizer};
    pub use crate::renderer::Renderer;
    pub use crate::scene::{parse_scene, render_scene, DrawCommand, Scene};
}
