//! Geometric primitives.
//!
//! Scene coordinates are real-valued and unclamped: a vertex may sit anywhere,
//! including outside the pixel grid.

use crate::color::Color;

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Integer cell containing this point (components floored, saturating).
    #[must_use]
    pub fn cell(self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }
}

/// A position with a color, referenced by index from draw commands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    /// Scene position.
    pub position: Point,
    /// Vertex color.
    pub color: Color,
}

impl Vertex {
    /// Create a new vertex.
    #[must_use]
    pub const fn new(position: Point, color: Color) -> Self {
        Self { position, color }
    }

    /// Create a vertex from raw coordinates and color components.
    #[must_use]
    pub const fn from_parts(x: f32, y: f32, r: f32, g: f32, b: f32) -> Self {
        Self::new(Point::new(x, y), Color::new(r, g, b))
    }
}

/// A line segment with a color at each end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start vertex.
    pub start: Vertex,
    /// End vertex.
    pub end: Vertex,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Vertex, end: Vertex) -> Self {
        Self { start, end }
    }
}

/// A triangle with a color at each corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// The three corners, in declaration order.
    pub vertices: [Vertex; 3],
}

impl Triangle {
    /// Create a new triangle.
    #[must_use]
    pub const fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        Self { vertices: [v1, v2, v3] }
    }

    /// Twice the signed area (positive when the corners wind clockwise on a
    /// y-down grid).
    #[must_use]
    pub fn doubled_signed_area(&self) -> f64 {
        let [a, b, c] = self.vertices.map(|v| v.position);
        edge_function(a, b, c)
    }

    /// Whether the corners are collinear or coincident.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.doubled_signed_area() == 0.0
    }
}

/// Edge function of `p` against the directed edge `a -> b`.
///
/// Evaluated in `f64` with the endpoints in a canonical order, so
/// `edge_function(a, b, p) == -edge_function(b, a, p)` holds bit for bit. Two
/// triangles sharing an edge therefore always agree on which side a point lies.
#[must_use]
pub fn edge_function(a: Point, b: Point, p: Point) -> f64 {
    if (a.x, a.y) > (b.x, b.y) {
        return -edge_function(b, a, p);
    }

    let (ax, ay) = (f64::from(a.x), f64::from(a.y));
    let (bx, by) = (f64::from(b.x), f64::from(b.y));
    let (px, py) = (f64::from(p.x), f64::from(p.y));

    (bx - ax) * (py - ay) - (by - ay) * (px - ax)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_floors() {
        assert_eq!(Point::new(1.9, 0.1).cell(), (1, 0));
        assert_eq!(Point::new(-0.5, 2.0).cell(), (-1, 2));
    }

    #[test]
    fn test_cell_saturates() {
        let (x, _) = Point::new(1e30, 0.0).cell();
        assert_eq!(x, i64::MAX);
    }

    #[test]
    fn test_edge_function_antisymmetric() {
        let a = Point::new(0.3, 1.7);
        let b = Point::new(5.1, -2.2);
        let p = Point::new(2.5, 0.5);
        assert_eq!(edge_function(a, b, p), -edge_function(b, a, p));
    }

    #[test]
    fn test_signed_area() {
        let tri = Triangle::new(
            Vertex::from_parts(0.0, 0.0, 1.0, 0.0, 0.0),
            Vertex::from_parts(4.0, 0.0, 0.0, 1.0, 0.0),
            Vertex::from_parts(0.0, 4.0, 0.0, 0.0, 1.0),
        );
        assert_eq!(tri.doubled_signed_area(), 16.0);
        assert!(!tri.is_degenerate());
    }

    #[test]
    fn test_collinear_is_degenerate() {
        let tri = Triangle::new(
            Vertex::from_parts(0.0, 0.0, 1.0, 1.0, 1.0),
            Vertex::from_parts(1.0, 1.0, 1.0, 1.0, 1.0),
            Vertex::from_parts(3.0, 3.0, 1.0, 1.0, 1.0),
        );
        assert!(tri.is_degenerate());
    }
}
