use slotmap::{SlotMap, new_key_type};

use crate::geometry::{GeometryError, Plane, PlaneSpec, glyph};
use crate::math::Vec3;
use crate::paint::Color;
use crate::render::{LineVertex, VertexUpload};

use super::ActionError;

new_key_type! {
    /// Generation-tagged plane handle. Stale after the plane is cleared.
    pub struct PlaneKey;
    /// Generation-tagged point handle.
    pub struct PointKey;
}

/// Smallest crosshair size the preview marker is drawn with.
pub const MIN_PREVIEW_SIZE: f32 = 0.1;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneStyle {
    /// Edge length of the square outline.
    pub size: f32,
    pub color: Color,
}

impl Default for PlaneStyle {
    fn default() -> Self {
        Self {
            size: 6.0,
            color: Color::from_srgb_u8(0x4c, 0xd9, 0x9a),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointStyle {
    /// Crosshair arms extend `2 * size` from the centre.
    pub size: f32,
    pub color: Color,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: 0.2,
            color: Color::from_srgb_u8(0xa6, 0x6d, 0xf2),
        }
    }
}

/// Geometry kept on the CPU until its buffer is uploaded.
#[derive(Debug)]
struct Mesh<H> {
    vertices: Vec<LineVertex>,
    handle: Option<H>,
}

impl<H> Mesh<H> {
    fn new(vertices: Vec<LineVertex>) -> Self {
        Self { vertices, handle: None }
    }

    fn sync<U: VertexUpload<Handle = H>>(&mut self, uploader: &U, label: &str) -> usize {
        if self.handle.is_some() {
            return 0;
        }
        self.handle = Some(uploader.upload(label, &self.vertices));
        1
    }
}

#[derive(Debug)]
pub struct PlaneEntity<H> {
    pub plane: Plane,
    pub style: PlaneStyle,
    mesh: Mesh<H>,
}

#[derive(Debug)]
pub struct PointEntity<H> {
    pub position: Vec3,
    pub style: PointStyle,
    mesh: Mesh<H>,
}

/// The single live preview marker.
///
/// Position and visibility are recomputed from the last selection and
/// `(u, v)`; geometry is rebuilt whenever either changes.
#[derive(Debug)]
struct Preview<H> {
    selection: Option<PlaneKey>,
    uv: (f32, f32),
    style: PointStyle,
    position: Option<Vec3>,
    dirty: bool,
    handle: Option<H>,
}

/// Owns every drawable entity and its render handle.
///
/// `H` is the render handle type (`LineBuffer` on a real device). Entities are
/// created CPU-side; [`SceneStore::sync`] uploads whatever is missing.
#[derive(Debug)]
pub struct SceneStore<H> {
    grid: Mesh<H>,
    cube: Mesh<H>,

    planes: SlotMap<PlaneKey, PlaneEntity<H>>,
    plane_order: Vec<PlaneKey>,

    points: SlotMap<PointKey, PointEntity<H>>,
    point_order: Vec<PointKey>,

    preview: Preview<H>,
}

impl<H> Default for SceneStore<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> SceneStore<H> {
    pub fn new() -> Self {
        Self {
            grid: Mesh::new(glyph::axes_and_grid()),
            cube: Mesh::new(glyph::cube()),
            planes: SlotMap::with_key(),
            plane_order: Vec::new(),
            points: SlotMap::with_key(),
            point_order: Vec::new(),
            preview: Preview {
                selection: None,
                uv: (0.0, 0.0),
                style: PointStyle::default(),
                position: None,
                dirty: false,
                handle: None,
            },
        }
    }

    // ── planes ────────────────────────────────────────────────────────────

    /// Builds a plane from `spec` and appends it to the plane order.
    pub fn add_plane(&mut self, spec: &PlaneSpec, style: PlaneStyle) -> Result<PlaneKey, GeometryError> {
        let plane = Plane::from_spec(spec)?;
        if !style.size.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        let mesh = Mesh::new(glyph::plane_outline(&plane, style.size, style.color));
        let key = self.planes.insert(PlaneEntity { plane, style, mesh });
        self.plane_order.push(key);

        log::debug!("plane added: origin={:?} normal={:?}", plane.origin, plane.normal);
        Ok(key)
    }

    #[inline]
    pub fn plane_count(&self) -> usize {
        self.plane_order.len()
    }

    /// Resolves a position in insertion order to a live key.
    #[inline]
    pub fn plane_key_at(&self, index: usize) -> Option<PlaneKey> {
        self.plane_order.get(index).copied()
    }

    #[inline]
    pub fn plane(&self, key: PlaneKey) -> Option<&Plane> {
        self.planes.get(key).map(|e| &e.plane)
    }

    /// Live plane keys in insertion order.
    #[inline]
    pub fn plane_keys(&self) -> &[PlaneKey] {
        &self.plane_order
    }

    #[inline]
    pub fn plane_handle(&self, key: PlaneKey) -> Option<&H> {
        self.planes.get(key).and_then(|e| e.mesh.handle.as_ref())
    }

    /// Drops every plane and its buffer. All outstanding keys go stale.
    pub fn clear_planes(&mut self) {
        self.planes.clear();
        self.plane_order.clear();
        self.refresh_preview();
    }

    // ── points ────────────────────────────────────────────────────────────

    pub fn add_point(&mut self, position: Vec3, style: PointStyle) -> PointKey {
        let mesh = Mesh::new(glyph::crosshair(position, style.size, style.color));
        let key = self.points.insert(PointEntity { position, style, mesh });
        self.point_order.push(key);
        key
    }

    /// Projects `(u, v)` through the selected plane and stores a point there.
    pub fn plot_point(
        &mut self,
        selection: Option<PlaneKey>,
        u: f32,
        v: f32,
        style: PointStyle,
    ) -> Result<(PointKey, Vec3), ActionError> {
        let plane = selection
            .and_then(|key| self.plane(key))
            .copied()
            .ok_or(ActionError::NoPlaneSelected)?;
        if !u.is_finite() || !v.is_finite() {
            return Err(ActionError::Geometry(GeometryError::NonFinite));
        }

        let position = plane.project(u, v);
        let key = self.add_point(position, style);
        Ok((key, position))
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.point_order.len()
    }

    #[inline]
    pub fn point(&self, key: PointKey) -> Option<&PointEntity<H>> {
        self.points.get(key)
    }

    #[inline]
    pub fn point_keys(&self) -> &[PointKey] {
        &self.point_order
    }

    #[inline]
    pub fn point_handle(&self, key: PointKey) -> Option<&H> {
        self.points.get(key).and_then(|e| e.mesh.handle.as_ref())
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
        self.point_order.clear();
    }

    // ── preview ───────────────────────────────────────────────────────────

    /// Moves the preview to `(u, v)` on the selected plane.
    ///
    /// Returns the new world position, or `None` when the selection does not
    /// resolve to a live plane (the marker is then hidden).
    pub fn set_preview(&mut self, selection: Option<PlaneKey>, u: f32, v: f32) -> Option<Vec3> {
        self.preview.selection = selection;
        self.preview.uv = (u, v);
        self.refresh_preview();
        self.preview.position
    }

    pub fn set_preview_style(&mut self, style: PointStyle) {
        if self.preview.style != style {
            self.preview.style = style;
            self.preview.dirty = true;
        }
    }

    #[inline]
    pub fn preview_position(&self) -> Option<Vec3> {
        self.preview.position
    }

    #[inline]
    pub fn preview_visible(&self) -> bool {
        self.preview.position.is_some()
    }

    /// Handle of the preview marker, only while it is visible and uploaded.
    #[inline]
    pub fn preview_handle(&self) -> Option<&H> {
        if self.preview.dirty || self.preview.position.is_none() {
            return None;
        }
        self.preview.handle.as_ref()
    }

    fn refresh_preview(&mut self) {
        let (u, v) = self.preview.uv;
        let position = match self.preview.selection.and_then(|key| self.planes.get(key)) {
            Some(entity) if u.is_finite() && v.is_finite() => Some(entity.plane.project(u, v)),
            _ => None,
        };
        if position != self.preview.position {
            self.preview.position = position;
            self.preview.dirty = true;
        }
    }

    // ── static geometry ───────────────────────────────────────────────────

    #[inline]
    pub fn grid_handle(&self) -> Option<&H> {
        self.grid.handle.as_ref()
    }

    #[inline]
    pub fn cube_handle(&self) -> Option<&H> {
        self.cube.handle.as_ref()
    }

    // ── upload ────────────────────────────────────────────────────────────

    /// Uploads geometry for every entity still missing a handle, and rebuilds
    /// the preview if it changed. Returns the number of uploads made.
    pub fn sync<U: VertexUpload<Handle = H>>(&mut self, uploader: &U) -> usize {
        let mut uploads = self.grid.sync(uploader, "planar axes+grid");
        uploads += self.cube.sync(uploader, "planar cube");

        for entity in self.planes.values_mut() {
            uploads += entity.mesh.sync(uploader, "planar plane outline");
        }
        for entity in self.points.values_mut() {
            uploads += entity.mesh.sync(uploader, "planar point marker");
        }

        if self.preview.dirty {
            self.preview.dirty = false;
            self.preview.handle = match self.preview.position {
                Some(position) => {
                    let style = self.preview.style;
                    let size = style.size.max(MIN_PREVIEW_SIZE);
                    let vertices = glyph::crosshair(position, size, style.color);
                    uploads += 1;
                    Some(uploader.upload("planar preview marker", &vertices))
                }
                None => None,
            };
        }

        uploads
    }
}
