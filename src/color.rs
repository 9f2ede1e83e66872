//! Color types.
//!
//! Scene colors are floating-point RGB triples in `[0, 1]`, matching the scene
//! language. Encoders quantize them to 8-bit [`Rgba`] at the output boundary.

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red component (0.0-1.0).
    pub r: f32,
    /// Green component (0.0-1.0).
    pub g: f32,
    /// Blue component (0.0-1.0).
    pub b: f32,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// Light gray shown behind unset cells.
    pub const BACKGROUND: Self = Self::new(0.9, 0.9, 0.9);

    /// Create a new color.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Whether every component is a finite value in `[0, 1]`.
    #[must_use]
    pub fn is_normalized(self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Linear interpolation: `self * (1 - t) + other * t`.
    ///
    /// `t == 0` returns `self` and `t == 1` returns `other` exactly.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            self.r * inv_t + other.r * t,
            self.g * inv_t + other.g * t,
            self.b * inv_t + other.b * t,
        )
    }

    /// Weighted blend of three colors, clamped back into `[0, 1]`.
    #[must_use]
    pub fn blend3(colors: [Self; 3], weights: [f32; 3]) -> Self {
        let channel = |f: fn(Self) -> f32| {
            (f(colors[0]) * weights[0] + f(colors[1]) * weights[1] + f(colors[2]) * weights[2])
                .clamp(0.0, 1.0)
        };

        Self::new(channel(|c| c.r), channel(|c| c.g), channel(|c| c.b))
    }

    /// Quantize to an opaque 8-bit color.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba::rgb(q(self.r), q(self.g), q(self.b))
    }
}

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// CSS color string (`rgb(...)` when opaque).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        color.to_rgba()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_color_constants() {
        assert_eq!(Color::RED.to_array(), [1.0, 0.0, 0.0]);
        assert_eq!(Color::BLUE.to_rgba(), Rgba::rgb(0, 0, 255));
        assert_eq!(Color::BACKGROUND.to_rgba(), Rgba::rgb(230, 230, 230));
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let a = Color::new(0.3, 0.7, 0.1);
        let b = Color::new(0.9, 0.2, 0.6);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Color::RED.lerp(Color::BLUE, 0.5);
        assert_relative_eq!(mid.r, 0.5);
        assert_relative_eq!(mid.g, 0.0);
        assert_relative_eq!(mid.b, 0.5);
    }

    #[test]
    fn test_blend3_clamps() {
        let c = Color::blend3([Color::WHITE, Color::WHITE, Color::WHITE], [0.5, 0.5, 0.5]);
        assert_eq!(c, Color::WHITE);
    }

    #[test]
    fn test_blend3_weights() {
        let c = Color::blend3([Color::RED, Color::GREEN, Color::BLUE], [0.25, 0.25, 0.5]);
        assert_relative_eq!(c.r, 0.25);
        assert_relative_eq!(c.g, 0.25);
        assert_relative_eq!(c.b, 0.5);
    }

    #[test]
    fn test_is_normalized() {
        assert!(Color::new(0.0, 0.5, 1.0).is_normalized());
        assert!(!Color::new(1.5, 0.0, 0.0).is_normalized());
        assert!(!Color::new(f32::NAN, 0.0, 0.0).is_normalized());
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let c = Rgba::new(10, 20, 30, 40);
        assert_eq!(Rgba::from_array(c.to_array()), c);
    }

    #[test]
    fn test_rgba_css() {
        assert_eq!(Rgba::rgb(1, 2, 3).to_css(), "rgb(1,2,3)");
        assert_eq!(Rgba::TRANSPARENT.to_css(), "rgba(0,0,0,0.000)");
    }
}
