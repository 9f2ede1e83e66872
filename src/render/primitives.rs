//! Primitive rasterization functions.
//!
//! Implements the three scene primitives with per-vertex color:
//!
//! - Points: floored to a cell, written unmodified, off-grid is an error.
//! - Lines: midpoint integer walk along the major axis, colors interpolated by
//!   step, off-grid cells clipped.
//! - Triangles: barycentric coverage of pixel centers with a top-left
//!   tie-break, colors blended by barycentric weight, clipped to the grid.

use crate::color::Color;
use crate::error::Result;
use crate::framebuffer::PixelBuffer;
use crate::geometry::{edge_function, Line, Point, Triangle, Vertex};

/// Trait for primitives that can be rasterized into a [`PixelBuffer`].
pub trait Drawable {
    /// Rasterize this primitive into the buffer.
    fn draw(&self, buffer: &mut PixelBuffer) -> Result<()>;
}

/// Cells further than this from the origin are clamped before line stepping.
///
/// Keeps the `i128` midpoint products far from overflow. `f32` positions stop
/// being integer-exact long before this.
const MAX_CELL: i64 = 1 << 60;

// ============================================================================
// Point Drawing
// ============================================================================

/// Draw a single vertex into the cell containing its position.
///
/// # Errors
///
/// Returns [`Error::OutOfBounds`](crate::Error::OutOfBounds) if the floored
/// position is outside the grid.
pub fn draw_point(buffer: &mut PixelBuffer, vertex: Vertex) -> Result<()> {
    let (x, y) = vertex.position.cell();
    buffer.set(x, y, vertex.color)
}

impl Drawable for Vertex {
    fn draw(&self, buffer: &mut PixelBuffer) -> Result<()> {
        draw_point(buffer, *self)
    }
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line with colors interpolated from `start` to `end`.
///
/// Both endpoints are floored to cells. The walk steps once per cell along the
/// major axis (the axis with the larger extent), so every cell is visited
/// exactly once and in order from `start` to `end`. The minor coordinate at
/// step `i` of `n` is `round(i * d_minor / n)` with halves rounded up, which is
/// the midpoint decision of Bresenham's algorithm in closed form. The color
/// at step `i` is `start.color * (1 - t) + end.color * t` with `t = i / n`.
///
/// Cells outside the grid are skipped. Only the steps whose major coordinate
/// falls inside the grid are walked.
///
/// If both positions are identical the line is [`draw_point`] of `start`.
///
/// # References
///
/// Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
pub fn draw_line(buffer: &mut PixelBuffer, start: Vertex, end: Vertex) -> Result<()> {
    if start.position == end.position {
        return draw_point(buffer, start);
    }

    let clamp = |v: i64| i128::from(v.clamp(-MAX_CELL, MAX_CELL));
    let (x0, y0) = start.position.cell();
    let (x1, y1) = end.position.cell();
    let (x0, y0, x1, y1) = (clamp(x0), clamp(y0), clamp(x1), clamp(y1));

    let (dx, dy) = (x1 - x0, y1 - y0);
    let steep = dy.abs() > dx.abs();
    let (major0, minor0, d_major, d_minor) =
        if steep { (y0, x0, dy, dx) } else { (x0, y0, dx, dy) };

    let n = d_major.abs();
    if n == 0 {
        // Distinct positions inside the same cell.
        plot(buffer, x0, y0, start.color);
        return Ok(());
    }

    let s_major = d_major.signum();
    let s_minor = d_minor.signum();
    let a_minor = d_minor.abs();

    let Some((first, last)) = visible_steps(major0, s_major, n, buffer.pixels_wide()) else {
        log::trace!("line ({x0},{y0})-({x1},{y1}) entirely off-grid");
        return Ok(());
    };
    log::trace!("line ({x0},{y0})-({x1},{y1}): steps {first}..={last} of {n}");

    for i in first..=last {
        let major = major0 + s_major * i;
        let minor = minor0 + s_minor * ((2 * i * a_minor + n) / (2 * n));
        let (x, y) = if steep { (minor, major) } else { (major, minor) };

        let t = (i as f64 / n as f64) as f32;
        plot(buffer, x, y, start.color.lerp(end.color, t));
    }

    Ok(())
}

/// Range of step indices `i` in `[0, n]` whose major coordinate
/// `major0 + s_major * i` lies in `[0, pixels_wide)`.
fn visible_steps(major0: i128, s_major: i128, n: i128, pixels_wide: u32) -> Option<(i128, i128)> {
    let last_cell = i128::from(pixels_wide) - 1;
    let (lo, hi) = if s_major > 0 {
        (-major0, last_cell - major0)
    } else {
        (major0 - last_cell, major0)
    };

    let first = lo.max(0);
    let last = hi.min(n);
    (first <= last).then_some((first, last))
}

/// Write a cell if it lies inside the grid.
#[inline]
fn plot(buffer: &mut PixelBuffer, x: i128, y: i128, color: Color) {
    let (Ok(x), Ok(y)) = (i64::try_from(x), i64::try_from(y)) else {
        return;
    };
    if buffer.contains(x, y) {
        // In bounds by the check above.
        let _ = buffer.set(x, y, color);
    }
}

impl Drawable for Line {
    fn draw(&self, buffer: &mut PixelBuffer) -> Result<()> {
        draw_line(buffer, self.start, self.end)
    }
}

// ============================================================================
// Triangle Drawing
// ============================================================================

/// Draw a filled triangle with barycentric color interpolation.
///
/// Every cell of the triangle's bounding box (clipped to the grid) is tested
/// at its center `(x + 0.5, y + 0.5)`. A cell is filled when all three
/// barycentric weights are non-negative; a weight of exactly zero counts only
/// when it comes from a top or left edge. Edges shared by two abutting
/// triangles are therefore owned by exactly one of them, independent of
/// draw order.
///
/// Degenerate triangles (zero signed area) draw nothing.
///
/// # References
///
/// Pineda, J. (1988). "A Parallel Algorithm for Polygon Rasterization." SIGGRAPH '88.
pub fn draw_triangle(buffer: &mut PixelBuffer, triangle: &Triangle) -> Result<()> {
    let area = triangle.doubled_signed_area();
    if area == 0.0 || !area.is_finite() {
        log::trace!("skipping degenerate triangle {:?}", triangle.vertices);
        return Ok(());
    }

    // Wind the corners so that interior points have positive edge functions.
    let [a, mut b, mut c] = triangle.vertices;
    let area = if area < 0.0 {
        std::mem::swap(&mut b, &mut c);
        -area
    } else {
        area
    };

    let Some((x_range, y_range)) = clipped_bounds(&[a, b, c], buffer.pixels_wide()) else {
        log::trace!("triangle entirely off-grid");
        return Ok(());
    };
    log::trace!("triangle bbox x={x_range:?} y={y_range:?}");

    let (pa, pb, pc) = (a.position, b.position, c.position);
    let colors = [a.color, b.color, c.color];

    for y in y_range {
        for x in x_range.clone() {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);

            let e_bc = edge_function(pb, pc, center);
            let e_ca = edge_function(pc, pa, center);
            let e_ab = edge_function(pa, pb, center);

            if covers(e_bc, pb, pc) && covers(e_ca, pc, pa) && covers(e_ab, pa, pb) {
                let weights = [(e_bc / area) as f32, (e_ca / area) as f32, (e_ab / area) as f32];
                buffer.set(x, y, Color::blend3(colors, weights))?;
            }
        }
    }

    Ok(())
}

/// Integer cell ranges covering the vertices' bounding box, clipped to the grid.
fn clipped_bounds(
    vertices: &[Vertex; 3],
    pixels_wide: u32,
) -> Option<(std::ops::RangeInclusive<i64>, std::ops::RangeInclusive<i64>)> {
    let xs = vertices.map(|v| f64::from(v.position.x));
    let ys = vertices.map(|v| f64::from(v.position.y));
    let last_cell = f64::from(pixels_wide) - 1.0;

    let axis = |values: [f64; 3]| {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lo = min.floor().max(0.0);
        let hi = max.ceil().min(last_cell);
        (lo <= hi).then(|| lo as i64..=hi as i64)
    };

    Some((axis(xs)?, axis(ys)?))
}

/// Inside-or-owned-edge test for one edge function value.
#[inline]
fn covers(edge: f64, from: Point, to: Point) -> bool {
    edge > 0.0 || (edge == 0.0 && is_top_left(from, to))
}

/// Top-left rule for an edge of a positively wound triangle on a y-down grid.
///
/// A top edge is horizontal with the interior below it; a left edge goes up
/// the screen. An edge and its reverse never both qualify.
#[inline]
fn is_top_left(from: Point, to: Point) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    dy < 0.0 || (dy == 0.0 && dx > 0.0)
}

impl Drawable for Triangle {
    fn draw(&self, buffer: &mut PixelBuffer) -> Result<()> {
        draw_triangle(buffer, self)
    }
}

// ============================================================================
// Tests
// ============================================================================
