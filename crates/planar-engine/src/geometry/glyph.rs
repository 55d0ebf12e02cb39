//! Line-list vertex builders for every shape the scene draws.
//!
//! All builders emit pairs of vertices (one segment per pair) for
//! `PrimitiveTopology::LineList`.

use crate::math::Vec3;
use crate::paint::Color;
use crate::render::LineVertex;

use super::Plane;

/// Length of each world axis line.
pub const AXIS_LENGTH: f32 = 5.0;
/// The grid spans `[-GRID_EXTENT, GRID_EXTENT]` on X and Z.
pub const GRID_EXTENT: i32 = 20;
/// Half edge of the animated cube.
pub const CUBE_HALF_EXTENT: f32 = 0.5;

pub const GRID_COLOR: Color = Color::new(0.2, 0.4, 0.8);
pub const CUBE_COLOR: Color = Color::new(1.0, 0.7, 0.3);

#[inline]
fn segment(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, color: Color) {
    out.push(LineVertex::new(a, color));
    out.push(LineVertex::new(b, color));
}

/// Square outline of edge `size` centred on the plane origin: 4 segments.
pub fn plane_outline(plane: &Plane, size: f32, color: Color) -> Vec<LineVertex> {
    let c = plane.corners(size);
    let mut out = Vec::with_capacity(8);
    for i in 0..4 {
        segment(&mut out, c[i], c[(i + 1) % 4], color);
    }
    out
}

/// Three axis-aligned segments through `center`, each of half-length `2·size`.
pub fn crosshair(center: Vec3, size: f32, color: Color) -> Vec<LineVertex> {
    let h = size * 2.0;
    let mut out = Vec::with_capacity(6);
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        let d = axis.scale(h);
        segment(&mut out, center - d, center + d, color);
    }
    out
}

/// World axes (X red, Y green, Z blue) plus the XZ reference grid.
pub fn axes_and_grid() -> Vec<LineVertex> {
    let lines_per_dir = (2 * GRID_EXTENT + 1) as usize;
    let mut out = Vec::with_capacity(6 + lines_per_dir * 4);

    segment(&mut out, Vec3::ZERO, Vec3::X.scale(AXIS_LENGTH), Color::new(1.0, 0.0, 0.0));
    segment(&mut out, Vec3::ZERO, Vec3::Y.scale(AXIS_LENGTH), Color::new(0.0, 1.0, 0.0));
    segment(&mut out, Vec3::ZERO, Vec3::Z.scale(AXIS_LENGTH), Color::new(0.0, 0.0, 1.0));

    let s = GRID_EXTENT as f32;
    for i in -GRID_EXTENT..=GRID_EXTENT {
        let t = i as f32;
        segment(&mut out, Vec3::new(-s, 0.0, t), Vec3::new(s, 0.0, t), GRID_COLOR);
        segment(&mut out, Vec3::new(t, 0.0, -s), Vec3::new(t, 0.0, s), GRID_COLOR);
    }
    out
}

/// Wireframe cube centred on the origin: 12 edges.
pub fn cube() -> Vec<LineVertex> {
    let h = CUBE_HALF_EXTENT;
    // Bit 0 → x, bit 1 → y, bit 2 → z.
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 != 0 { h } else { -h },
            if i & 2 != 0 { h } else { -h },
            if i & 4 != 0 { h } else { -h },
        )
    };

    let mut out = Vec::with_capacity(24);
    for i in 0..8 {
        for bit in [1, 2, 4] {
            // Each edge once: from the corner with the bit clear.
            if i & bit == 0 {
                segment(&mut out, corner(i), corner(i | bit), CUBE_COLOR);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(v: &LineVertex) -> Vec3 {
        Vec3::new(v.position[0], v.position[1], v.position[2])
    }

    #[test]
    fn outline_is_closed_square() {
        let plane = Plane::from_normal_point(Vec3::new(0.0, 1.0, 0.0), Vec3::Z).unwrap();
        let verts = plane_outline(&plane, 3.0, Color::new(1.0, 1.0, 1.0));
        assert_eq!(verts.len(), 8);
        for i in 0..4 {
            let end = pos(&verts[i * 2 + 1]);
            let next_start = pos(&verts[((i + 1) % 4) * 2]);
            assert_eq!(end, next_start);
            let len = (end - pos(&verts[i * 2])).length();
            assert!((len - 3.0).abs() < 1e-5);
        }
        for v in &verts {
            assert!((pos(v) - plane.origin).dot(plane.normal).abs() < 1e-5);
        }
    }

    #[test]
    fn crosshair_extends_twice_size() {
        let c = Vec3::new(1.0, 2.0, 3.0);
        let verts = crosshair(c, 0.25, Color::new(0.0, 0.0, 0.0));
        assert_eq!(verts.len(), 6);
        for pair in verts.chunks(2) {
            let (a, b) = (pos(&pair[0]), pos(&pair[1]));
            assert!(((a - b).length() - 1.0).abs() < 1e-6);
            assert_eq!((a + b).scale(0.5), c);
        }
    }

    #[test]
    fn axes_and_grid_counts() {
        let verts = axes_and_grid();
        assert_eq!(verts.len(), 6 + 41 * 4);
        assert_eq!(verts[1].color, [1.0, 0.0, 0.0]);
        assert_eq!(verts[3].position, [0.0, AXIS_LENGTH, 0.0]);
        assert!(verts[6..].iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn cube_has_twelve_unit_edges() {
        let verts = cube();
        assert_eq!(verts.len(), 24);
        for pair in verts.chunks(2) {
            let len = (pos(&pair[1]) - pos(&pair[0])).length();
            assert!((len - 2.0 * CUBE_HALF_EXTENT).abs() < 1e-6);
        }
    }
}
