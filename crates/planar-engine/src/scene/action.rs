use std::fmt;

use crate::geometry::{GeometryError, PlaneSpec};
use crate::math::Vec3;

use super::{PlaneKey, PlaneStyle, PointStyle, SceneStore};

/// Discrete scene edit requested by the host.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Action {
    AddPlane { spec: PlaneSpec, style: PlaneStyle },
    ClearPlanes,
    PlotPoint { selection: Option<PlaneKey>, u: f32, v: f32, style: PointStyle },
    ClearPoints,
    /// Live field change: moves and restyles the preview marker.
    UpdatePreview { selection: Option<PlaneKey>, u: f32, v: f32, style: PointStyle },
}

/// What an applied action produced, for the host to display.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ActionOutcome {
    PlaneAdded { key: PlaneKey, plane_count: usize },
    PlanesCleared,
    PointPlotted { position: Vec3 },
    PointsCleared,
    /// Preview readout; `None` while no live plane is selected.
    PreviewMoved { position: Option<Vec3> },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActionError {
    Geometry(GeometryError),
    /// The selection is empty or refers to a cleared plane.
    NoPlaneSelected,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Geometry(e) => write!(f, "invalid geometry: {e}"),
            ActionError::NoPlaneSelected => write!(f, "no plane selected"),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::Geometry(e) => Some(e),
            ActionError::NoPlaneSelected => None,
        }
    }
}

impl From<GeometryError> for ActionError {
    fn from(e: GeometryError) -> Self {
        ActionError::Geometry(e)
    }
}

impl<H> SceneStore<H> {
    /// Applies one action. A failed action leaves the store unchanged.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, ActionError> {
        match action {
            Action::AddPlane { spec, style } => {
                let key = self.add_plane(&spec, style)?;
                Ok(ActionOutcome::PlaneAdded {
                    key,
                    plane_count: self.plane_count(),
                })
            }
            Action::ClearPlanes => {
                self.clear_planes();
                Ok(ActionOutcome::PlanesCleared)
            }
            Action::PlotPoint { selection, u, v, style } => {
                let (_, position) = self.plot_point(selection, u, v, style)?;
                Ok(ActionOutcome::PointPlotted { position })
            }
            Action::ClearPoints => {
                self.clear_points();
                Ok(ActionOutcome::PointsCleared)
            }
            Action::UpdatePreview { selection, u, v, style } => {
                self.set_preview_style(style);
                let position = self.set_preview(selection, u, v);
                Ok(ActionOutcome::PreviewMoved { position })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Store = SceneStore<()>;

    fn add(store: &mut Store, spec: PlaneSpec) -> PlaneKey {
        match store.apply(Action::AddPlane { spec, style: PlaneStyle::default() }) {
            Ok(ActionOutcome::PlaneAdded { key, .. }) => key,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn add_plane_reports_count() {
        let mut store = Store::new();
        let spec = PlaneSpec::NormalPoint { point: Vec3::ZERO, normal: Vec3::Y };
        add(&mut store, spec);
        let out = store.apply(Action::AddPlane { spec, style: PlaneStyle::default() }).unwrap();
        assert!(matches!(out, ActionOutcome::PlaneAdded { plane_count: 2, .. }));
    }

    #[test]
    fn zero_normal_surfaces_geometry_error() {
        let mut store = Store::new();
        let spec = PlaneSpec::NormalPoint { point: Vec3::ZERO, normal: Vec3::ZERO };
        let err = store.apply(Action::AddPlane { spec, style: PlaneStyle::default() }).unwrap_err();
        assert_eq!(err, ActionError::Geometry(GeometryError::ZeroNormal));
        assert_eq!(store.plane_count(), 0);
    }

    #[test]
    fn three_point_plot_lands_on_plane() {
        let mut store = Store::new();
        let key = add(
            &mut store,
            PlaneSpec::ThreePoints { p1: Vec3::ZERO, p2: Vec3::X, p3: Vec3::Y },
        );
        let out = store
            .apply(Action::PlotPoint { selection: Some(key), u: 1.5, v: -2.0, style: PointStyle::default() })
            .unwrap();
        let ActionOutcome::PointPlotted { position } = out else {
            panic!("unexpected outcome: {out:?}");
        };
        assert!((position - Vec3::new(1.5, -2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn plot_after_clear_is_rejected() {
        let mut store = Store::new();
        let key = add(&mut store, PlaneSpec::NormalPoint { point: Vec3::ZERO, normal: Vec3::Z });
        store.apply(Action::ClearPlanes).unwrap();
        let err = store
            .apply(Action::PlotPoint { selection: Some(key), u: 0.0, v: 0.0, style: PointStyle::default() })
            .unwrap_err();
        assert_eq!(err, ActionError::NoPlaneSelected);
        assert_eq!(store.point_count(), 0);
    }

    #[test]
    fn update_preview_returns_readout() {
        let mut store = Store::new();
        let key = add(&mut store, PlaneSpec::NormalPoint { point: Vec3::ZERO, normal: Vec3::Z });
        let out = store
            .apply(Action::UpdatePreview { selection: Some(key), u: 2.0, v: 0.0, style: PointStyle::default() })
            .unwrap();
        let ActionOutcome::PreviewMoved { position: Some(p) } = out else {
            panic!("unexpected outcome: {out:?}");
        };
        assert!((p - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);

        let out = store
            .apply(Action::UpdatePreview { selection: None, u: 2.0, v: 0.0, style: PointStyle::default() })
            .unwrap();
        assert_eq!(out, ActionOutcome::PreviewMoved { position: None });
    }

    #[test]
    fn error_display_includes_cause() {
        let e = ActionError::from(GeometryError::Degenerate);
        assert!(e.to_string().contains("collinear"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
