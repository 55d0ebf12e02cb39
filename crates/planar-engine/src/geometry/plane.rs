use crate::math::Vec3;

use super::GeometryError;

/// Above this `|n.x|` the world X axis is too close to the normal to serve as
/// the reference direction, so world Y is used instead.
const REFERENCE_AXIS_THRESHOLD: f32 = 0.9;

/// Relative tolerance for rejecting collinear three-point input.
///
/// Compared against `|â x b̂|`, the sine of the angle between the two edge
/// directions.
const COLLINEAR_SINE: f32 = 1e-6;

/// How a plane is specified by the user.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlaneSpec {
    /// A point on the plane and a (not necessarily unit) normal.
    NormalPoint { point: Vec3, normal: Vec3 },
    /// Three points on the plane; `p1` becomes the origin.
    ThreePoints { p1: Vec3, p2: Vec3, p3: Vec3 },
}

/// A plane with an orthonormal, right-handed in-plane basis.
///
/// Invariant: `u`, `v` and `normal` are unit length, mutually orthogonal and
/// `u.cross(v) == normal`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
    pub u: Vec3,
    pub v: Vec3,
}

impl Plane {
    /// Builds a plane from either construction mode.
    pub fn from_spec(spec: &PlaneSpec) -> Result<Self, GeometryError> {
        match *spec {
            PlaneSpec::NormalPoint { point, normal } => Self::from_normal_point(point, normal),
            PlaneSpec::ThreePoints { p1, p2, p3 } => Self::from_three_points(p1, p2, p3),
        }
    }

    /// Builds a plane through `point` perpendicular to `normal`.
    ///
    /// `u` is derived from a world reference axis (X unless the normal is
    /// nearly parallel to it, then Y), so it is never close to degenerate.
    pub fn from_normal_point(point: Vec3, normal: Vec3) -> Result<Self, GeometryError> {
        if !point.is_finite() || !normal.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if normal.max_abs() == 0.0 {
            return Err(GeometryError::ZeroNormal);
        }

        let n = normal.normalize();
        let reference = if n.x.abs() < REFERENCE_AXIS_THRESHOLD { Vec3::X } else { Vec3::Y };
        let u = n.cross(reference).normalize();
        let v = n.cross(u).normalize();

        Ok(Self { origin: point, normal: n, u, v })
    }

    /// Builds a plane through three points.
    ///
    /// `u` points from `p1` toward `p2`; `v` is the in-plane direction toward
    /// `p3` made orthogonal to `u`.
    pub fn from_three_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Result<Self, GeometryError> {
        if !p1.is_finite() || !p2.is_finite() || !p3.is_finite() {
            return Err(GeometryError::NonFinite);
        }

        let a = p2 - p1;
        let b = p3 - p1;
        // Finite points can still be too far apart to subtract in f32.
        if !a.is_finite() || !b.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if a.max_abs() == 0.0 || b.max_abs() == 0.0 {
            return Err(GeometryError::Degenerate);
        }

        let u = a.normalize();
        let n = u.cross(b.normalize());
        if n.length() <= COLLINEAR_SINE {
            return Err(GeometryError::Degenerate);
        }

        let normal = n.normalize();
        let v = normal.cross(u);

        Ok(Self { origin: p1, normal, u, v })
    }

    /// Maps plane coordinates to world space: `origin + u·U + v·V`.
    #[inline]
    pub fn project(&self, u: f32, v: f32) -> Vec3 {
        self.origin + self.u.scale(u) + self.v.scale(v)
    }

    /// Corners of a square of edge `size` centred on the origin, in winding order.
    pub fn corners(&self, size: f32) -> [Vec3; 4] {
        let h = size * 0.5;
        [
            self.project(-h, -h),
            self.project(h, -h),
            self.project(h, h),
            self.project(-h, h),
        ]
    }
}
