//! Square pixel buffer of optional colors.
//!
//! A cell is either unset (shows the display background) or holds an exact
//! [`Color`]. Unset is not the same as black.

use crate::color::Color;
use crate::error::{Error, Result};

/// A `pixels_wide x pixels_wide` grid of optional colors.
///
/// Cells are stored in row-major order. Writes overwrite (last write wins, no
/// blending).
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    /// Side length in cells.
    pixels_wide: u32,
    /// Cells in row-major order: index `y * pixels_wide + x`.
    cells: Vec<Option<Color>>,
}

impl PixelBuffer {
    /// Create a new buffer with every cell unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if `pixels_wide` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::framebuffer::PixelBuffer;
    ///
    /// let buffer = PixelBuffer::new(4).unwrap();
    /// assert_eq!(buffer.pixels_wide(), 4);
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new(pixels_wide: u32) -> Result<Self> {
        if pixels_wide == 0 {
            return Err(Error::InvalidSize { pixels_wide });
        }

        let side = pixels_wide as usize;
        Ok(Self { pixels_wide, cells: vec![None; side * side] })
    }

    /// Side length in cells.
    #[must_use]
    pub const fn pixels_wide(&self) -> u32 {
        self.pixels_wide
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells currently holding a color.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no cell holds a color.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Whether `(x, y)` addresses a cell of this buffer.
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let w = i64::from(self.pixels_wide);
        (0..w).contains(&x) && (0..w).contains(&y)
    }

    /// Set the color of a cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `(x, y)` is outside the grid.
    pub fn set(&mut self, x: i64, y: i64, color: Color) -> Result<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = Some(color);
        Ok(())
    }

    /// Get the color of a cell, `None` if unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `(x, y)` is outside the grid.
    pub fn get(&self, x: i64, y: i64) -> Result<Option<Color>> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Reset every cell to unset.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Iterate `(x, y, color)` over every set cell.
    ///
    /// Order is row-major: `y` ascending, then `x` ascending within a row. The
    /// iterator is lazy and can be cloned to restart the traversal.
    pub fn iter_set_pixels(&self) -> SetPixels<'_> {
        SetPixels { buffer: self, next: 0 }
    }

    /// Cells of one row, `None` if `y` is outside the grid.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[Option<Color>]> {
        if y >= self.pixels_wide {
            return None;
        }
        let w = self.pixels_wide as usize;
        let start = y as usize * w;
        Some(&self.cells[start..start + w])
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds { x, y, pixels_wide: self.pixels_wide });
        }
        Ok(y as usize * self.pixels_wide as usize + x as usize)
    }
}

/// Row-major iterator over the set cells of a [`PixelBuffer`].
#[derive(Debug, Clone)]
pub struct SetPixels<'a> {
    buffer: &'a PixelBuffer,
    next: usize,
}

impl Iterator for SetPixels<'_> {
    type Item = (u32, u32, Color);

    fn next(&mut self) -> Option<Self::Item> {
        let w = self.buffer.pixels_wide as usize;
        while self.next < self.buffer.cells.len() {
            let idx = self.next;
            self.next += 1;
            if let Some(color) = self.buffer.cells[idx] {
                return Some(((idx % w) as u32, (idx / w) as u32, color));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.buffer.cells.len().saturating_sub(self.next)))
    }
}
