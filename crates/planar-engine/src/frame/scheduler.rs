use core::f32::consts::FRAC_PI_3;

use crate::camera::OrbitCamera;
use crate::coords::Viewport;
use crate::math::Mat4;
use crate::paint::Color;
use crate::render::{LineBuffer, LinePipeline, RenderCtx, RenderTarget, SLOT_CUBE, SLOT_IDENTITY};
use crate::scene::{PlaneKey, PointKey, SceneStore};

/// Per-frame projection and animation settings.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameConfig {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub clear: Color,
    /// Cube rotation rate in radians per second.
    pub cube_rate: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            fov_y: FRAC_PI_3,
            near: 0.1,
            far: 100.0,
            clear: Color::new(0.06, 0.07, 0.12),
            cube_rate: 0.5,
        }
    }
}

/// What a draw call renders.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawSource {
    /// Axes and reference grid.
    Grid,
    Plane(PlaneKey),
    Point(PointKey),
    Preview,
    Cube,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub source: DrawSource,
    /// Model-matrix slot in the line pipeline.
    pub slot: u32,
}

/// Builds and runs the fixed per-frame draw order.
///
/// Order: grid, plane outlines, point markers, preview (if visible), cube.
/// Matrices and the draw list are scratch state reused every frame.
#[derive(Debug)]
pub struct FrameScheduler {
    config: FrameConfig,
    proj: Mat4,
    view: Mat4,
    cube_model: Mat4,
    calls: Vec<DrawCall>,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}

impl FrameScheduler {
    pub fn new(config: FrameConfig) -> Self {
        Self {
            config,
            proj: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            cube_model: Mat4::IDENTITY,
            calls: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Projection with wgpu depth range, as last computed by [`Self::plan`].
    #[inline]
    pub fn proj(&self) -> &Mat4 {
        &self.proj
    }

    #[inline]
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    #[inline]
    pub fn cube_model(&self) -> &Mat4 {
        &self.cube_model
    }

    /// Recomputes the frame matrices and the ordered draw list.
    pub fn plan<H>(
        &mut self,
        store: &SceneStore<H>,
        camera: &OrbitCamera,
        viewport: Viewport,
        elapsed: f32,
    ) -> &[DrawCall] {
        let c = &self.config;
        self.proj = Mat4::GL_TO_WGPU_DEPTH * Mat4::perspective(c.fov_y, viewport.aspect(), c.near, c.far);
        self.view = camera.view_matrix();
        self.cube_model = Mat4::rotate_y(elapsed * c.cube_rate);

        self.calls.clear();
        self.calls.push(DrawCall { source: DrawSource::Grid, slot: SLOT_IDENTITY });
        self.calls.extend(store.plane_keys().iter().map(|&k| DrawCall {
            source: DrawSource::Plane(k),
            slot: SLOT_IDENTITY,
        }));
        self.calls.extend(store.point_keys().iter().map(|&k| DrawCall {
            source: DrawSource::Point(k),
            slot: SLOT_IDENTITY,
        }));
        if store.preview_visible() {
            self.calls.push(DrawCall { source: DrawSource::Preview, slot: SLOT_IDENTITY });
        }
        self.calls.push(DrawCall { source: DrawSource::Cube, slot: SLOT_CUBE });

        &self.calls
    }

    /// Uploads the frame uniforms and issues the planned draws in one pass.
    ///
    /// Sources without an uploaded buffer are skipped.
    pub fn execute(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        pipeline: &LinePipeline,
        store: &SceneStore<LineBuffer>,
    ) {
        pipeline.write_globals(ctx.queue, &self.proj, &self.view);
        pipeline.write_model(ctx.queue, SLOT_IDENTITY, &Mat4::IDENTITY);
        pipeline.write_model(ctx.queue, SLOT_CUBE, &self.cube_model);

        let mut pass = target.begin_pass(self.config.clear);
        for call in &self.calls {
            let buffer = match call.source {
                DrawSource::Grid => store.grid_handle(),
                DrawSource::Plane(k) => store.plane_handle(k),
                DrawSource::Point(k) => store.point_handle(k),
                DrawSource::Preview => store.preview_handle(),
                DrawSource::Cube => store.cube_handle(),
            };
            if let Some(buffer) = buffer {
                pipeline.draw(&mut pass, buffer, call.slot);
            }
        }
    }

    /// One full frame: upload missing geometry, plan, then draw.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        pipeline: &LinePipeline,
        store: &mut SceneStore<LineBuffer>,
        camera: &OrbitCamera,
        elapsed: f32,
    ) {
        let uploads = store.sync(ctx.device);
        if uploads > 0 {
            log::trace!("uploaded {uploads} vertex buffers");
        }
        self.plan(store, camera, ctx.viewport, elapsed);
        self.execute(ctx, target, pipeline, store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PlaneSpec;
    use crate::math::Vec3;
    use crate::scene::{FakeHandle, FakeUploader, PlaneStyle, PointStyle};

    fn sources(calls: &[DrawCall]) -> Vec<DrawSource> {
        calls.iter().map(|c| c.source).collect()
    }

    #[test]
    fn empty_scene_draws_grid_then_cube() {
        let store = SceneStore::<FakeHandle>::new();
        let mut sched = FrameScheduler::default();
        let calls = sched.plan(&store, &OrbitCamera::default(), Viewport::new(800.0, 600.0), 0.0);
        assert_eq!(sources(calls), vec![DrawSource::Grid, DrawSource::Cube]);
        assert_eq!(calls[1].slot, SLOT_CUBE);
    }

    #[test]
    fn draw_order_is_fixed() {
        let up = FakeUploader::default();
        let mut store = SceneStore::<FakeHandle>::new();
        let spec = PlaneSpec::NormalPoint { point: Vec3::ZERO, normal: Vec3::Y };
        let a = store.add_plane(&spec, PlaneStyle::default()).unwrap();
        let b = store.add_plane(&spec, PlaneStyle::default()).unwrap();
        let (p, _) = store.plot_point(Some(b), 1.0, 1.0, PointStyle::default()).unwrap();
        store.set_preview(Some(a), 0.0, 0.0);
        store.sync(&up);

        let mut sched = FrameScheduler::default();
        let calls = sched.plan(&store, &OrbitCamera::default(), Viewport::new(800.0, 600.0), 1.0);
        assert_eq!(
            sources(calls),
            vec![
                DrawSource::Grid,
                DrawSource::Plane(a),
                DrawSource::Plane(b),
                DrawSource::Point(p),
                DrawSource::Preview,
                DrawSource::Cube,
            ]
        );
        assert!(calls[..5].iter().all(|c| c.slot == SLOT_IDENTITY));
    }

    #[test]
    fn hidden_preview_is_not_planned() {
        let mut store = SceneStore::<FakeHandle>::new();
        store.set_preview(None, 0.0, 0.0);
        let mut sched = FrameScheduler::default();
        let calls = sched.plan(&store, &OrbitCamera::default(), Viewport::new(10.0, 10.0), 0.0);
        assert!(!calls.iter().any(|c| c.source == DrawSource::Preview));
    }

    #[test]
    fn cube_angle_follows_elapsed_time() {
        let store = SceneStore::<FakeHandle>::new();
        let mut sched = FrameScheduler::default();
        sched.plan(&store, &OrbitCamera::default(), Viewport::new(800.0, 600.0), 2.0);
        assert_eq!(*sched.cube_model(), Mat4::rotate_y(1.0));
    }

    #[test]
    fn projection_tracks_viewport_aspect() {
        let store = SceneStore::<FakeHandle>::new();
        let mut sched = FrameScheduler::default();
        sched.plan(&store, &OrbitCamera::default(), Viewport::new(1600.0, 800.0), 0.0);
        let f = 1.0 / (FRAC_PI_3 * 0.5).tan();
        assert!((sched.proj().m[0] - f / 2.0).abs() < 1e-5);
        assert!((sched.proj().m[5] - f).abs() < 1e-5);
    }
}
