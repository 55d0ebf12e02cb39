use planar_engine::scene::{Action, ActionError, ActionOutcome, PlaneKey, SceneStore};

use crate::config::StudioConfig;
use crate::controls::Command;

/// Host-side editing state: which plane is selected and where the cursor sits on it.
///
/// Selection is kept as a position in the store's plane order, the way a
/// list widget would hold it; it resolves to a key on every use.
#[derive(Debug, Default)]
pub struct Session {
    selection: Option<usize>,
    u: f32,
    v: f32,
    next_normal_point: usize,
    next_three_point: usize,
}

impl Session {
    #[inline]
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    #[inline]
    pub fn uv(&self) -> (f32, f32) {
        (self.u, self.v)
    }

    pub fn selected_key<H>(&self, store: &SceneStore<H>) -> Option<PlaneKey> {
        self.selection.and_then(|i| store.plane_key_at(i))
    }

    /// Runs one command against the store and refreshes the preview.
    ///
    /// Returns the outcome of the scene action the command maps to, if any.
    pub fn handle<H>(
        &mut self,
        cmd: Command,
        store: &mut SceneStore<H>,
        config: &StudioConfig,
    ) -> Option<Result<ActionOutcome, ActionError>> {
        let action = match cmd {
            Command::CycleSelection => {
                self.cycle_selection(store.plane_count());
                None
            }
            Command::Nudge { du, dv } => {
                self.u += du;
                self.v += dv;
                None
            }
            Command::Plot => Some(Action::PlotPoint {
                selection: self.selected_key(store),
                u: self.u,
                v: self.v,
                style: config.point_style,
            }),
            Command::AddNormalPointPlane => {
                next_preset(&config.normal_point_presets, &mut self.next_normal_point)
                    .map(|spec| Action::AddPlane { spec, style: config.plane_style })
            }
            Command::AddThreePointPlane => {
                next_preset(&config.three_point_presets, &mut self.next_three_point)
                    .map(|spec| Action::AddPlane { spec, style: config.plane_style })
            }
            Command::ClearPoints => Some(Action::ClearPoints),
            Command::ClearPlanes => Some(Action::ClearPlanes),
            Command::Exit => None,
        };

        let outcome = action.map(|a| store.apply(a));
        match outcome {
            Some(Ok(ActionOutcome::PlaneAdded { plane_count, .. })) => {
                self.selection = Some(plane_count - 1);
            }
            Some(Ok(ActionOutcome::PlanesCleared)) => self.selection = None,
            _ => {}
        }

        self.refresh_preview(store, config);
        outcome
    }

    /// Moves the preview to the current selection and `(u, v)`.
    pub fn refresh_preview<H>(&self, store: &mut SceneStore<H>, config: &StudioConfig) {
        let selection = self.selected_key(store);
        store.set_preview_style(config.point_style);
        store.set_preview(selection, self.u, self.v);
    }

    fn cycle_selection(&mut self, plane_count: usize) {
        self.selection = match self.selection {
            _ if plane_count == 0 => None,
            None => Some(0),
            Some(i) if i + 1 < plane_count => Some(i + 1),
            Some(_) => None,
        };
    }
}

fn next_preset<T: Copy>(presets: &[T], cursor: &mut usize) -> Option<T> {
    if presets.is_empty() {
        return None;
    }
    let item = presets[*cursor % presets.len()];
    *cursor = (*cursor + 1) % presets.len();
    Some(item)
}

#[cfg(test)]
mod tests {
    use planar_engine::math::Vec3;

    use super::*;

    type Store = SceneStore<()>;

    #[test]
    fn adding_a_plane_selects_it() {
        let config = StudioConfig::default();
        let mut store = Store::new();
        let mut session = Session::default();

        session.handle(Command::AddNormalPointPlane, &mut store, &config);
        session.handle(Command::AddThreePointPlane, &mut store, &config);
        assert_eq!(store.plane_count(), 2);
        assert_eq!(session.selection(), Some(1));
        assert!(store.preview_visible());
    }

    #[test]
    fn selection_cycles_through_none() {
        let config = StudioConfig::default();
        let mut store = Store::new();
        let mut session = Session::default();
        session.handle(Command::AddNormalPointPlane, &mut store, &config);
        session.handle(Command::AddNormalPointPlane, &mut store, &config);

        let mut seen = Vec::new();
        for _ in 0..4 {
            session.handle(Command::CycleSelection, &mut store, &config);
            seen.push(session.selection());
        }
        assert_eq!(seen, vec![None, Some(0), Some(1), None]);
    }

    #[test]
    fn plot_uses_nudged_coordinates() {
        let config = StudioConfig::default();
        let mut store = Store::new();
        let mut session = Session::default();
        let spec = planar_engine::geometry::PlaneSpec::NormalPoint { point: Vec3::ZERO, normal: Vec3::Z };
        store.add_plane(&spec, config.plane_style).unwrap();
        session.handle(Command::CycleSelection, &mut store, &config);

        session.handle(Command::Nudge { du: 2.0, dv: 0.0 }, &mut store, &config);
        let out = session.handle(Command::Plot, &mut store, &config);
        let Some(Ok(ActionOutcome::PointPlotted { position })) = out else {
            panic!("unexpected outcome: {out:?}");
        };
        assert!((position - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn nudge_moves_preview_without_plotting() {
        let config = StudioConfig::default();
        let mut store = Store::new();
        let mut session = Session::default();
        let spec = planar_engine::geometry::PlaneSpec::NormalPoint { point: Vec3::ZERO, normal: Vec3::Z };
        store.add_plane(&spec, config.plane_style).unwrap();
        session.handle(Command::CycleSelection, &mut store, &config);

        let out = session.handle(Command::Nudge { du: 0.0, dv: 1.0 }, &mut store, &config);
        assert!(out.is_none());
        let p = store.preview_position().unwrap();
        // Normal +Z: v = -X.
        assert!((p - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-6);
        assert_eq!(store.point_count(), 0);
    }

    #[test]
    fn clearing_planes_drops_selection_and_preview() {
        let config = StudioConfig::default();
        let mut store = Store::new();
        let mut session = Session::default();
        session.handle(Command::AddNormalPointPlane, &mut store, &config);
        assert!(store.preview_visible());

        session.handle(Command::ClearPlanes, &mut store, &config);
        assert_eq!(session.selection(), None);
        assert!(!store.preview_visible());

        let out = session.handle(Command::Plot, &mut store, &config);
        assert_eq!(out, Some(Err(ActionError::NoPlaneSelected)));
    }

    #[test]
    fn presets_wrap_around() {
        let presets = [1, 2];
        let mut cursor = 0;
        let got: Vec<_> = (0..3).filter_map(|_| next_preset(&presets, &mut cursor)).collect();
        assert_eq!(got, vec![1, 2, 1]);
        assert_eq!(next_preset::<i32>(&[], &mut cursor), None);
    }
}
