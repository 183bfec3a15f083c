/// Drawing surface size in pixels.
///
/// Sprites bounce against `[0, width) x [0, height)` and the destination
/// projection maps the same box onto clip space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Builds a viewport from an integer framebuffer size.
    #[inline]
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixels_converts_both_axes() {
        assert_eq!(Viewport::from_pixels(640, 480), Viewport::new(640.0, 480.0));
    }

    #[test]
    fn zero_area_is_invalid() {
        assert!(!Viewport::new(0.0, 10.0).is_valid());
        assert!(!Viewport::new(10.0, 0.0).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }

    #[test]
    fn non_finite_is_invalid() {
        assert!(!Viewport::new(f32::INFINITY, 10.0).is_valid());
        assert!(!Viewport::new(10.0, f32::NAN).is_valid());
    }
}
