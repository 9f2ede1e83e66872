//! Rasterization of scene primitives.
//!
//! # Algorithms
//!
//! - **Midpoint line**: one cell per major-axis step, linear color interpolation
//! - **Barycentric triangle**: pixel-center coverage with a top-left tie-break,
//!   smooth (Gouraud) color blending
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Pineda, J. (1988). "A Parallel Algorithm for Polygon Rasterization." SIGGRAPH '88.

mod primitives;

pub use primitives::{draw_line, draw_point, draw_triangle, Drawable};

use crate::error::Result;
use crate::framebuffer::PixelBuffer;
use crate::geometry::{Triangle, Vertex};

/// Draws primitives into a borrowed [`PixelBuffer`].
///
/// The rasterizer keeps no state of its own: every call is a pure function of
/// its vertices, and the only effect is the writes into the buffer. Nothing
/// reads the buffer's previous contents.
///
/// # Example
///
/// ```
/// use trueno_raster::color::Color;
/// use trueno_raster::framebuffer::PixelBuffer;
/// use trueno_raster::geometry::Vertex;
/// use trueno_raster::render::Rasterizer;
///
/// let mut buffer = PixelBuffer::new(4).unwrap();
/// let mut raster = Rasterizer::new(&mut buffer);
/// raster.draw_point(Vertex::from_parts(1.0, 1.0, 1.0, 0.0, 0.0)).unwrap();
///
/// assert_eq!(buffer.get(1, 1).unwrap(), Some(Color::RED));
/// ```
#[derive(Debug)]
pub struct Rasterizer<'a> {
    buffer: &'a mut PixelBuffer,
}

impl<'a> Rasterizer<'a> {
    /// Create a rasterizer drawing into `buffer`.
    pub fn new(buffer: &'a mut PixelBuffer) -> Self {
        Self { buffer }
    }

    /// The target buffer.
    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer {
        &*self.buffer
    }

    /// Side length of the target buffer.
    #[must_use]
    pub fn pixels_wide(&self) -> u32 {
        self.buffer.pixels_wide()
    }

    /// Reset the target buffer to all unset.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Draw a single vertex. An off-grid point is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`](crate::Error::OutOfBounds) if the floored
    /// position is outside the grid.
    pub fn draw_point(&mut self, v: Vertex) -> Result<()> {
        draw_point(self.buffer, v)
    }

    /// Draw a color-interpolated line from `v1` to `v2`, clipped to the grid.
    pub fn draw_line(&mut self, v1: Vertex, v2: Vertex) -> Result<()> {
        draw_line(self.buffer, v1, v2)
    }

    /// Draw a smooth-shaded triangle, clipped to the grid.
    pub fn draw_triangle(&mut self, v1: Vertex, v2: Vertex, v3: Vertex) -> Result<()> {
        draw_triangle(self.buffer, &Triangle::new(v1, v2, v3))
    }

    /// Draw any [`Drawable`] primitive.
    pub fn draw<D: Drawable + ?Sized>(&mut self, shape: &D) -> Result<()> {
        shape.draw(self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Line;

    #[test]
    fn test_rasterizer_draws_all_primitives() {
        let mut buffer = PixelBuffer::new(8).unwrap();
        let mut raster = Rasterizer::new(&mut buffer);

        raster
            .draw_triangle(
                Vertex::from_parts(0.0, 0.0, 1.0, 0.0, 0.0),
                Vertex::from_parts(4.0, 0.0, 1.0, 0.0, 0.0),
                Vertex::from_parts(0.0, 4.0, 1.0, 0.0, 0.0),
            )
            .unwrap();
        raster
            .draw_line(
                Vertex::from_parts(0.0, 7.0, 0.0, 1.0, 0.0),
                Vertex::from_parts(7.0, 7.0, 0.0, 1.0, 0.0),
            )
            .unwrap();
        raster.draw_point(Vertex::from_parts(6.0, 2.0, 0.0, 0.0, 1.0)).unwrap();

        assert_eq!(raster.pixels_wide(), 8);
        assert_eq!(buffer.set_count(), 6 + 8 + 1);
        assert_eq!(buffer.get(6, 2).unwrap(), Some(Color::BLUE));
    }

    #[test]
    fn test_rasterizer_clear() {
        let mut buffer = PixelBuffer::new(2).unwrap();
        let mut raster = Rasterizer::new(&mut buffer);
        raster.draw_point(Vertex::from_parts(0.0, 0.0, 1.0, 1.0, 1.0)).unwrap();
        assert_eq!(raster.buffer().set_count(), 1);

        raster.clear();
        assert!(raster.buffer().is_empty());
    }

    #[test]
    fn test_rasterizer_draw_trait_object() {
        let mut buffer = PixelBuffer::new(4).unwrap();
        let mut raster = Rasterizer::new(&mut buffer);
        let line = Line::new(
            Vertex::from_parts(0.0, 0.0, 1.0, 1.0, 1.0),
            Vertex::from_parts(0.0, 3.0, 1.0, 1.0, 1.0),
        );
        let shape: &dyn Drawable = &line;
        raster.draw(shape).unwrap();
        assert_eq!(buffer.set_count(), 4);
    }
}
