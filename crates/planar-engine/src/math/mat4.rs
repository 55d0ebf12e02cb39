use core::ops::Mul;

use bytemuck::{Pod, Zeroable};

use super::Vec3;

/// 4x4 matrix, column-major (`m[col * 4 + row]`).
///
/// The layout matches WGSL `mat4x4<f32>`, so a `Mat4` is uploaded as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Remaps OpenGL clip depth (`[-1, 1]`) to the `[0, 1]` range wgpu rasterizes.
    ///
    /// Pre-multiply a projection built by [`Mat4::perspective`] with this.
    pub const GL_TO_WGPU_DEPTH: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.5, 0.0, //
            0.0, 0.0, 0.5, 1.0,
        ],
    };

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::IDENTITY;
        out.m[12] = x;
        out.m[13] = y;
        out.m[14] = z;
        out
    }

    /// Rotation about the Y axis, turning +X toward +Z (`rotate_y(π/2)` maps
    /// +X to +Z). Seen from above (+Y), positive angles turn clockwise.
    #[inline]
    pub fn rotate_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0] = c;
        out.m[2] = s;
        out.m[8] = -s;
        out.m[10] = c;
        out
    }

    /// Right-handed perspective projection with OpenGL clip depth.
    ///
    /// A view-space point at `z = -near` lands on NDC depth -1 and one at
    /// `z = -far` on +1. `fov_y` is in radians.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let nf = 1.0 / (near - far);

        let mut m = [0.0; 16];
        m[0] = f / aspect;
        m[5] = f;
        m[10] = (far + near) * nf;
        m[11] = -1.0;
        m[14] = 2.0 * far * near * nf;
        Self { m }
    }

    /// Right-handed view matrix looking from `eye` toward `target`.
    ///
    /// `eye == target` (or `up` parallel to the view direction) gives a
    /// degenerate matrix; callers keep the eye off the target.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let z = (eye - target).normalize();
        let x = up.cross(z).normalize();
        let y = z.cross(x);

        Self {
            m: [
                x.x, y.x, z.x, 0.0, //
                x.y, y.y, z.y, 0.0, //
                x.z, y.z, z.z, 0.0, //
                -x.dot(eye),
                -y.dot(eye),
                -z.dot(eye),
                1.0,
            ],
        }
    }

    /// Multiplies a homogeneous column vector.
    pub fn mul_vec4(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (row, o) in out.iter_mut().enumerate() {
            *o = self.m[row] * v[0]
                + self.m[4 + row] * v[1]
                + self.m[8 + row] * v[2]
                + self.m[12 + row] * v[3];
        }
        out
    }

    /// Transforms a point (w = 1) and applies the perspective divide.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let [x, y, z, w] = self.mul_vec4([p.x, p.y, p.z, 1.0]);
        let w = if w != 0.0 { w } else { 1.0 };
        Vec3::new(x / w, y / w, z / w)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut m = [0.0; 16];
        for c in 0..4 {
            for r in 0..4 {
                m[c * 4 + r] = (0..4).map(|k| self.m[k * 4 + r] * rhs.m[c * 4 + k]).sum();
            }
        }
        Mat4 { m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    const EPS: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn close_v(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn identity_times_anything_is_unchanged() {
        let t = Mat4::translate(1.0, 2.0, 3.0) * Mat4::rotate_y(0.3);
        assert_eq!(Mat4::IDENTITY * t, t);
        assert_eq!(t * Mat4::IDENTITY, t);
    }

    #[test]
    fn translate_moves_points_not_layout() {
        let t = Mat4::translate(1.0, -2.0, 3.0);
        assert_eq!(t.m[12..], [1.0, -2.0, 3.0, 1.0]);
        assert!(close_v(t.transform_point(Vec3::ZERO), Vec3::new(1.0, -2.0, 3.0)));
    }

    #[test]
    fn rotate_y_quarter_turn() {
        let r = Mat4::rotate_y(FRAC_PI_2);
        assert!(close_v(r.transform_point(Vec3::X), Vec3::Z));
        assert!(close_v(r.transform_point(Vec3::Z), -Vec3::X));
        assert!(close_v(r.transform_point(Vec3::Y), Vec3::Y));
    }

    // ── perspective ───────────────────────────────────────────────────────

    #[test]
    fn perspective_maps_near_and_far_to_clip_bounds() {
        let (near, far) = (0.1, 100.0);
        let p = Mat4::perspective(FRAC_PI_3, 1.0, near, far);

        let at_near = p.transform_point(Vec3::new(0.0, 0.0, -near));
        let at_far = p.transform_point(Vec3::new(0.0, 0.0, -far));

        assert!(close(at_near.z, -1.0), "near mapped to {}", at_near.z);
        assert!(close(at_far.z, 1.0), "far mapped to {}", at_far.z);
    }

    #[test]
    fn perspective_w_is_view_distance() {
        let p = Mat4::perspective(FRAC_PI_3, 1.0, 0.1, 100.0);
        let clip = p.mul_vec4([0.0, 0.0, -5.0, 1.0]);
        assert!(close(clip[3], 5.0));
    }

    #[test]
    fn perspective_respects_fov_and_aspect() {
        // Frustum edge: y = tan(fov/2) * d lands on NDC y = 1, x scaled by aspect.
        let d = 10.0;
        let p = Mat4::perspective(FRAC_PI_3, 2.0, 0.1, 100.0);
        let edge_y = (FRAC_PI_3 * 0.5).tan() * d;
        let ndc = p.transform_point(Vec3::new(edge_y * 2.0, edge_y, -d));
        assert!(close(ndc.y, 1.0));
        assert!(close(ndc.x, 1.0));
    }

    #[test]
    fn depth_remap_targets_zero_to_one() {
        let (near, far) = (0.1, 100.0);
        let p = Mat4::GL_TO_WGPU_DEPTH * Mat4::perspective(FRAC_PI_3, 1.0, near, far);
        assert!(close(p.transform_point(Vec3::new(0.0, 0.0, -near)).z, 0.0));
        assert!(close(p.transform_point(Vec3::new(0.0, 0.0, -far)).z, 1.0));
    }

    // ── look_at ───────────────────────────────────────────────────────────

    #[test]
    fn look_at_moves_eye_to_origin_and_target_down_negative_z() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let v = Mat4::look_at(eye, Vec3::ZERO, Vec3::Y);

        assert!(close_v(v.transform_point(eye), Vec3::ZERO));

        let dist = eye.length();
        assert!(close_v(v.transform_point(Vec3::ZERO), Vec3::new(0.0, 0.0, -dist)));
    }

    #[test]
    fn look_at_keeps_world_up_on_screen_up() {
        let v = Mat4::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        assert!(close_v(v.transform_point(Vec3::Y), Vec3::new(0.0, 1.0, -10.0)));
    }

    #[test]
    fn look_at_degenerate_stays_finite() {
        let v = Mat4::look_at(Vec3::ZERO, Vec3::ZERO, Vec3::Y);
        assert!(v.m.iter().all(|x| x.is_finite()));
    }
}
