//! Scene description language.
//!
//! A scene is a `;`-separated list of commands, each a tag followed by
//! `,`-separated numeric fields.
//!
//! # Syntax
//!
//! ```text
//! v,x,y,r,g,b     - Declare a vertex (position, color in [0, 1])
//! p,i             - Point at vertex i
//! l,i,j           - Line from vertex i to vertex j
//! t,i,j,k         - Filled triangle over vertices i, j, k
//! ```
//!
//! Vertices are numbered from 0 in declaration order. Whitespace around
//! commands and fields is ignored.
//!
//! # Example
//!
//! ```rust
//! use trueno_raster::color::Color;
//! use trueno_raster::framebuffer::PixelBuffer;
//! use trueno_raster::scene::render_scene;
//!
//! let mut buffer = PixelBuffer::new(4).unwrap();
//! render_scene(&mut buffer, "v,1,1,1,0,0;p,0;").unwrap();
//!
//! assert_eq!(buffer.get(1, 1).unwrap(), Some(Color::RED));
//! assert_eq!(buffer.set_count(), 1);
//! ```

mod parser;

pub use parser::parse_scene;

use crate::error::{Error, Result};
use crate::framebuffer::PixelBuffer;
use crate::geometry::Vertex;
use crate::render::Rasterizer;
use std::fmt;

/// A draw command, resolved to vertex indices at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawCommand {
    /// A single point.
    Point {
        /// Vertex index.
        v: usize,
    },
    /// A line segment.
    Line {
        /// Start vertex index.
        v1: usize,
        /// End vertex index.
        v2: usize,
    },
    /// A filled triangle.
    Triangle {
        /// First corner index.
        v1: usize,
        /// Second corner index.
        v2: usize,
        /// Third corner index.
        v3: usize,
    },
}

impl DrawCommand {
    /// Position of this command's class in the draw order: triangles, lines, points.
    #[must_use]
    pub const fn draw_rank(&self) -> u8 {
        match self {
            Self::Triangle { .. } => 0,
            Self::Line { .. } => 1,
            Self::Point { .. } => 2,
        }
    }

    /// The vertex indices this command references.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            Self::Point { v } => vec![v],
            Self::Line { v1, v2 } => vec![v1, v2],
            Self::Triangle { v1, v2, v3 } => vec![v1, v2, v3],
        }
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point { v } => write!(f, "p,{v}"),
            Self::Line { v1, v2 } => write!(f, "l,{v1},{v2}"),
            Self::Triangle { v1, v2, v3 } => write!(f, "t,{v1},{v2},{v3}"),
        }
    }
}

/// Parsed vertices plus draw commands for one render cycle.
///
/// Every command's indices are known to be in range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    vertices: Vec<Vertex>,
    commands: Vec<DrawCommand>,
}

impl Scene {
    /// Build a scene from already-resolved parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVertexIndex`] if a command references a vertex
    /// that is not in `vertices`.
    pub fn new(vertices: Vec<Vertex>, commands: Vec<DrawCommand>) -> Result<Self> {
        for cmd in &commands {
            if let Some(&bad) = cmd.indices().iter().find(|&&i| i >= vertices.len()) {
                return Err(Error::InvalidVertexIndex {
                    command: cmd.to_string(),
                    index: i64::try_from(bad).unwrap_or(i64::MAX),
                    count: vertices.len(),
                });
            }
        }
        Ok(Self::from_validated(vertices, commands))
    }

    /// Parse scene text. See [`parse_scene`].
    pub fn parse(text: &str) -> Result<Self> {
        parse_scene(text)
    }

    pub(crate) fn from_validated(vertices: Vec<Vertex>, commands: Vec<DrawCommand>) -> Self {
        Self { vertices, commands }
    }

    /// Vertices in declaration order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Draw commands in text order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands in the order they are drawn: all triangles, then all lines,
    /// then all points, each class keeping its text order.
    pub fn draw_order(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        (0..=2).flat_map(move |rank| self.commands.iter().filter(move |c| c.draw_rank() == rank))
    }

    /// Check that every command drawn as a single point lands inside a
    /// `pixels_wide` grid: point commands, and lines whose endpoints share a
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for the first off-grid point in draw order.
    pub fn check_points(&self, pixels_wide: u32) -> Result<()> {
        let w = i64::from(pixels_wide);
        for cmd in self.draw_order() {
            let v = match *cmd {
                DrawCommand::Point { v } => v,
                DrawCommand::Line { v1, v2 }
                    if self.vertices[v1].position == self.vertices[v2].position =>
                {
                    v1
                }
                _ => continue,
            };
            let (x, y) = self.vertices[v].position.cell();
            if !((0..w).contains(&x) && (0..w).contains(&y)) {
                return Err(Error::OutOfBounds { x, y, pixels_wide });
            }
        }
        Ok(())
    }

    /// Draw every command through `raster`.
    ///
    /// Points (including zero-length lines) are bounds-checked before anything
    /// is drawn, so an off-grid point fails without touching the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if a point command lies off the grid.
    pub fn render(&self, raster: &mut Rasterizer<'_>) -> Result<()> {
        self.check_points(raster.pixels_wide())?;

        for cmd in self.draw_order() {
            log::debug!("drawing {cmd}");
            match *cmd {
                DrawCommand::Triangle { v1, v2, v3 } => raster.draw_triangle(
                    self.vertices[v1],
                    self.vertices[v2],
                    self.vertices[v3],
                )?,
                DrawCommand::Line { v1, v2 } => {
                    raster.draw_line(self.vertices[v1], self.vertices[v2])?;
                }
                DrawCommand::Point { v } => raster.draw_point(self.vertices[v])?,
            }
        }

        Ok(())
    }
}

/// Clear `buffer`, parse `text` and draw it.
///
/// The buffer is cleared before parsing, so a failed render leaves it empty
/// and a successful one fully replaces the previous scene.
///
/// # Errors
///
/// Any parse error, or [`Error::OutOfBounds`] for an off-grid point.
pub fn render_scene(buffer: &mut PixelBuffer, text: &str) -> Result<Scene> {
    buffer.clear();
    let scene = parse_scene(text)?;
    scene.render(&mut Rasterizer::new(buffer))?;
    Ok(scene)
}
