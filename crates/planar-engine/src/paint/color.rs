/// Linear RGB color.
///
/// Components are in linear space; the sRGB surface encodes them on write.
/// Vertices carry color as plain `[r, g, b]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a linear color from sRGB bytes (`0`–`255`), e.g. a `#56ccf2` literal.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_srgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Creates a linear color from sRGB components in `[0, 1]`.
    #[inline]
    pub fn from_srgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_endpoints_are_preserved() {
        assert_eq!(Color::from_srgb_u8(0, 0, 0), Color::new(0.0, 0.0, 0.0));
        let w = Color::from_srgb_u8(255, 255, 255);
        assert!((w.r - 1.0).abs() < 1e-6 && (w.g - 1.0).abs() < 1e-6 && (w.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn srgb_mid_grey_is_darker_in_linear() {
        let c = Color::from_srgb_u8(128, 128, 128);
        assert!(c.r > 0.2 && c.r < 0.23, "got {}", c.r);
    }
}
