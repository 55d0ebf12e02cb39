use super::frame::InputFrame;
use super::types::{InputEvent, Modifiers, PointerButtonEvent, PointerMoveEvent};

/// What the runtime needs to stamp raw window events: the held modifiers and
/// the last pointer position (winit reports button presses without one).
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    /// Logical pixels; `None` once the pointer leaves the window.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Folds `ev` into the tracked state and queues it on `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = m,
            InputEvent::Key { modifiers, .. } => self.modifiers = modifiers,
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => self.pointer_pos = Some((x, y)),
            InputEvent::PointerButton(PointerButtonEvent { x, y, modifiers, .. }) => {
                self.pointer_pos = Some((x, y));
                self.modifiers = modifiers;
            }
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Focused(false) => self.modifiers = Modifiers::default(),
            InputEvent::Focused(true) => {}
        }

        frame.push_event(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState, MouseButton, MouseButtonState};

    const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false, meta: false };

    #[test]
    fn events_are_queued_in_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let a = InputEvent::Key { key: Key::Tab, state: KeyState::Pressed, modifiers: SHIFT, repeat: false };
        let b = InputEvent::PointerMoved(PointerMoveEvent { x: 3.0, y: 4.0 });
        state.apply_event(&mut frame, a);
        state.apply_event(&mut frame, b);
        assert_eq!(frame.events, vec![a, b]);
        assert_eq!(state.modifiers, SHIFT);

        frame.clear();
        assert!(frame.events.is_empty());
    }

    #[test]
    fn pointer_is_tracked_until_it_leaves() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 4.0,
                y: 5.0,
                modifiers: Modifiers::default(),
            }),
        );
        assert_eq!(state.pointer_pos, Some((4.0, 5.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    #[test]
    fn focus_loss_drops_held_modifiers() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::ModifiersChanged(SHIFT));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert_eq!(state.modifiers, Modifiers::default());
    }
}
