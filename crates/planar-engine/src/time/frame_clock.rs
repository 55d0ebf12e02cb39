use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock started. Drives animation.
    pub elapsed: f32,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Elapsed time is wall-clock from construction, so animation speed does not
/// depend on frame rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    /// Samples the clock.
    pub fn tick(&mut self) -> FrameTime {
        FrameTime {
            elapsed: Instant::now().saturating_duration_since(self.start).as_secs_f32(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn elapsed_never_decreases() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(a.elapsed >= 0.0);
        assert!(b.elapsed >= a.elapsed);
    }

    #[test]
    fn elapsed_tracks_wall_clock() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(20));
        assert!(clock.tick().elapsed >= 0.020);
    }
}
