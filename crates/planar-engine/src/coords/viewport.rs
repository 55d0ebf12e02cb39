/// Viewport size in logical pixels.
///
/// Pointer coordinates share this space (top-left origin, +Y down).
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

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height; 1.0 for a degenerate (minimized) viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    /// Half-open containment: `[0, width) x [0, height)`.
    #[inline]
    pub fn contains(self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width && y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_valid_viewport() {
        assert_eq!(Viewport::new(1280.0, 720.0).aspect(), 1280.0 / 720.0);
    }

    #[test]
    fn aspect_falls_back_when_minimized() {
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), 1.0);
    }

    #[test]
    fn contains_is_half_open() {
        let vp = Viewport::new(100.0, 50.0);
        assert!(vp.contains(0.0, 0.0));
        assert!(vp.contains(99.5, 49.5));
        assert!(!vp.contains(100.0, 10.0));
        assert!(!vp.contains(10.0, -1.0));
    }
}
