use anyhow::{Context, Result};
use log::{info, warn};

use planar_engine::camera::OrbitCamera;
use planar_engine::core::{App, AppControl, FrameCtx};
use planar_engine::device::Gpu;
use planar_engine::frame::FrameScheduler;
use planar_engine::input::{InputEvent, KeyState};
use planar_engine::render::{LineBuffer, LinePipeline};
use planar_engine::scene::{Action, ActionOutcome, SceneStore};

use crate::config::StudioConfig;
use crate::controls::{Command, command_for};
use crate::session::Session;

/// Host application: maps input to scene actions and renders each frame.
pub struct StudioApp {
    config: StudioConfig,
    pipeline: Option<LinePipeline>,
    store: SceneStore<LineBuffer>,
    camera: OrbitCamera,
    scheduler: FrameScheduler,
    session: Session,
}

impl StudioApp {
    pub fn new(config: StudioConfig) -> Self {
        Self {
            camera: OrbitCamera::new(config.orbit),
            scheduler: FrameScheduler::new(config.frame),
            pipeline: None,
            store: SceneStore::new(),
            session: Session::default(),
            config,
        }
    }

    fn add_startup_planes(&mut self) {
        for spec in &self.config.startup_planes {
            let action = Action::AddPlane { spec: *spec, style: self.config.plane_style };
            if let Err(e) = self.store.apply(action) {
                warn!("startup plane {spec:?} rejected: {e}");
            }
        }
        if self.store.plane_count() > 0 {
            // Select the first plane so the preview is visible right away.
            self.session.handle(Command::CycleSelection, &mut self.store, &self.config);
        }
    }

    /// Returns `AppControl::Exit` when the command asks to quit.
    fn run_command(&mut self, cmd: Command) -> AppControl {
        if cmd == Command::Exit {
            return AppControl::Exit;
        }

        match self.session.handle(cmd, &mut self.store, &self.config) {
            Some(Ok(ActionOutcome::PlaneAdded { plane_count, .. })) => {
                info!("plane added ({plane_count} total)");
            }
            Some(Ok(ActionOutcome::PointPlotted { position })) => {
                info!("point plotted at ({:.3}, {:.3}, {:.3})", position.x, position.y, position.z);
            }
            Some(Ok(ActionOutcome::PlanesCleared)) => info!("planes cleared"),
            Some(Ok(ActionOutcome::PointsCleared)) => info!("points cleared"),
            Some(Ok(ActionOutcome::PreviewMoved { .. })) | None => {}
            Some(Err(e)) => warn!("{e}"),
        }

        if matches!(cmd, Command::CycleSelection | Command::Nudge { .. }) {
            self.log_preview();
        }
        AppControl::Continue
    }

    fn log_preview(&self) {
        let (u, v) = self.session.uv();
        match (self.session.selection(), self.store.preview_position()) {
            (Some(i), Some(p)) => {
                info!("plane {i} (u={u:.2}, v={v:.2}) -> ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
            }
            _ => info!("no plane selected (u={u:.2}, v={v:.2})"),
        }
    }
}

impl App for StudioApp {
    fn on_init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let pipeline = LinePipeline::new(gpu.device(), gpu.surface_format())
            .context("failed to build line pipeline")?;
        self.pipeline = Some(pipeline);
        self.add_startup_planes();
        info!("Tab: select plane · arrows: move (Shift: coarse) · Enter: plot · N/T: add plane · P/X: clear · Esc: quit");
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();

        for event in &ctx.input_frame.events {
            self.camera.handle_event(event, viewport);

            let InputEvent::Key { key, state: KeyState::Pressed, modifiers, repeat } = *event else {
                continue;
            };
            let Some(cmd) = command_for(key, modifiers, self.config.fine_step, self.config.coarse_step) else {
                continue;
            };
            if repeat && !cmd.repeats() {
                continue;
            }
            if self.run_command(cmd) == AppControl::Exit {
                return AppControl::Exit;
            }
        }

        let Some(pipeline) = self.pipeline.as_ref() else {
            return AppControl::Continue;
        };

        let elapsed = ctx.time.elapsed;
        let (store, camera, scheduler) = (&mut self.store, &self.camera, &mut self.scheduler);
        ctx.render(|rctx, target| {
            scheduler.render(rctx, target, pipeline, store, camera, elapsed);
        })
    }
}
