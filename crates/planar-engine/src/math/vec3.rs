use core::ops::{Add, Mul, Neg, Sub};

/// 3D vector in world units.
///
/// Plain value type; every operation returns a new vector.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[inline]
    pub fn scale(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Largest absolute component.
    #[inline]
    pub fn max_abs(self) -> f32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Euclidean length, free of intermediate overflow or underflow.
    ///
    /// Components are divided by the largest one before squaring, so vectors
    /// near `f32::MAX` or deep in the subnormal range still measure correctly.
    #[inline]
    pub fn length(self) -> f32 {
        if !self.is_finite() {
            return self.length_squared().sqrt();
        }
        let m = self.max_abs();
        if m == 0.0 {
            return 0.0;
        }
        m * self.div_scalar(m).length_squared().sqrt()
    }

    /// Returns a unit-length copy.
    ///
    /// A zero-length or non-finite input is returned unchanged, so a
    /// degenerate direction never turns into NaN.
    #[inline]
    pub fn normalize(self) -> Vec3 {
        let m = self.max_abs();
        if m == 0.0 || !self.is_finite() {
            return self;
        }
        let s = self.div_scalar(m);
        s.div_scalar(s.length_squared().sqrt())
    }

    #[inline]
    fn div_scalar(self, d: f32) -> Vec3 {
        Vec3::new(self.x / d, self.y / d, self.z / d)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        self.scale(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn cross_of_basis_axes_is_right_handed() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn cross_is_anticommutative() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);
        assert!(approx(a.cross(b), -b.cross(a)));
    }

    #[test]
    fn normalize_produces_unit_length() {
        let n = Vec3::new(3.0, -4.0, 12.0).normalize();
        assert!((n.length() - 1.0).abs() < EPS);
        assert!(approx(n, Vec3::new(3.0 / 13.0, -4.0 / 13.0, 12.0 / 13.0)));
    }

    #[test]
    fn normalize_zero_returns_input_unchanged() {
        let n = Vec3::ZERO.normalize();
        assert_eq!(n, Vec3::ZERO);
        assert!(n.is_finite());
    }

    #[test]
    fn length_survives_extreme_magnitudes() {
        let big = Vec3::new(3e20, -4e20, 0.0);
        assert!((big.length() / 5e20 - 1.0).abs() < EPS);
        let tiny = Vec3::new(0.0, 3e-30, 4e-30);
        assert!((tiny.length() / 5e-30 - 1.0).abs() < EPS);
        assert_eq!(Vec3::new(0.0, -f32::MAX, 0.0).length(), f32::MAX);
    }

    #[test]
    fn normalize_extreme_magnitudes_is_unit() {
        let cases = [
            Vec3::new(1e20, 0.0, 0.0),
            Vec3::new(2e19, -2e19, 1e19),
            Vec3::new(1e-20, 1e-20, 0.0),
            Vec3::new(0.0, 0.0, 1e-40),
        ];
        for v in cases {
            let n = v.normalize();
            assert!((n.length() - 1.0).abs() < EPS, "{v:?} -> {n:?}");
        }
    }

    #[test]
    fn normalize_non_finite_returns_input_unchanged() {
        let v = Vec3::new(f32::INFINITY, 1.0, 0.0);
        assert_eq!(v.normalize(), v);
    }

    #[test]
    fn add_and_scale() {
        let p = Vec3::new(1.0, 1.0, 1.0) + Vec3::new(0.0, 2.0, -1.0).scale(2.0);
        assert_eq!(p, Vec3::new(1.0, 5.0, -1.0));
    }
}
