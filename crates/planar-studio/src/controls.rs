use planar_engine::input::{Key, Modifiers};

/// A keyboard command understood by the studio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    /// Select the next plane (wrapping, through "none").
    CycleSelection,
    /// Move the preview in plane coordinates.
    Nudge { du: f32, dv: f32 },
    Plot,
    AddNormalPointPlane,
    AddThreePointPlane,
    ClearPoints,
    ClearPlanes,
    Exit,
}

impl Command {
    /// Whether a held key keeps issuing this command. Only cursor nudges
    /// repeat; plotting or adding on auto-repeat would flood the scene.
    pub fn repeats(self) -> bool {
        matches!(self, Command::Nudge { .. })
    }
}

/// Maps a key press to a command. Arrows move by `fine` or, with Shift, `coarse`.
pub fn command_for(key: Key, modifiers: Modifiers, fine: f32, coarse: f32) -> Option<Command> {
    let step = if modifiers.shift { coarse } else { fine };
    let cmd = match key {
        Key::Tab => Command::CycleSelection,
        Key::ArrowRight => Command::Nudge { du: step, dv: 0.0 },
        Key::ArrowLeft => Command::Nudge { du: -step, dv: 0.0 },
        Key::ArrowUp => Command::Nudge { du: 0.0, dv: step },
        Key::ArrowDown => Command::Nudge { du: 0.0, dv: -step },
        Key::Enter | Key::Space => Command::Plot,
        Key::N => Command::AddNormalPointPlane,
        Key::T => Command::AddThreePointPlane,
        Key::P => Command::ClearPoints,
        Key::X => Command::ClearPlanes,
        Key::Escape => Command::Exit,
        _ => return None,
    };
    Some(cmd)
}
