use core::f32::consts::FRAC_PI_2;

use crate::coords::Viewport;
use crate::input::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};
use crate::math::{Mat4, Vec3};

/// Radius never drops below this, so the eye never coincides with the target.
const MIN_RADIUS: f32 = 1e-3;

/// Orbit camera tuning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitConfig {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    /// Radians per logical pixel of drag.
    pub sensitivity: f32,
    /// Pitch stays within `±(π/2 − pitch_margin)`.
    pub pitch_margin: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            yaw: -0.6,
            pitch: 0.4,
            radius: 14.0,
            sensitivity: 0.005,
            pitch_margin: 0.05,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CameraState {
    Idle,
    Dragging { last_x: f32, last_y: f32 },
}

/// Camera orbiting the world origin on a sphere of fixed radius.
///
/// ```text
/// Idle --pointer_down (inside viewport)--> Dragging
/// Dragging --pointer_move--> Dragging   (yaw += dx·k, pitch += dy·k, clamped)
/// Dragging --pointer_up / focus loss--> Idle
/// ```
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    radius: f32,
    sensitivity: f32,
    max_pitch: f32,
    state: CameraState,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}

impl OrbitCamera {
    pub fn new(config: OrbitConfig) -> Self {
        let max_pitch = (FRAC_PI_2 - config.pitch_margin.abs()).max(0.0);
        Self {
            yaw: config.yaw,
            pitch: config.pitch.clamp(-max_pitch, max_pitch),
            radius: config.radius.max(MIN_RADIUS),
            sensitivity: config.sensitivity,
            max_pitch,
            state: CameraState::Idle,
        }
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn state(&self) -> CameraState {
        self.state
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, CameraState::Dragging { .. })
    }

    /// Starts a drag if `(x, y)` lies inside the viewport.
    pub fn pointer_down(&mut self, x: f32, y: f32, viewport: Viewport) {
        if viewport.contains(x, y) {
            self.state = CameraState::Dragging { last_x: x, last_y: y };
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let CameraState::Dragging { last_x, last_y } = self.state else {
            return;
        };
        let yaw = self.yaw + (x - last_x) * self.sensitivity;
        let pitch = self.pitch + (y - last_y) * self.sensitivity;
        // NaN would survive the clamp and stick.
        if !yaw.is_finite() || !pitch.is_finite() {
            return;
        }
        self.yaw = yaw;
        self.pitch = pitch.clamp(-self.max_pitch, self.max_pitch);
        self.state = CameraState::Dragging { last_x: x, last_y: y };
    }

    /// Ends any drag, wherever the pointer is.
    pub fn pointer_up(&mut self) {
        self.state = CameraState::Idle;
    }

    /// Feeds a runtime input event. Only the left button drives the camera.
    pub fn handle_event(&mut self, event: &InputEvent, viewport: Viewport) {
        match *event {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                x,
                y,
                ..
            }) => match state {
                MouseButtonState::Pressed => self.pointer_down(x, y, viewport),
                MouseButtonState::Released => self.pointer_up(),
            },
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => self.pointer_move(x, y),
            InputEvent::Focused(false) => self.pointer_up(),
            _ => {}
        }
    }

    /// `radius · (cos p · cos y, sin p, cos p · sin y)`.
    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cp * cy, sp, cp * sy).scale(self.radius)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.eye(), Vec3::ZERO, Vec3::Y)
    }
}
