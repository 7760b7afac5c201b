//! Frame timing.
//!
//! The runner owns a [`FrameClock`] and ticks it once per frame; callbacks
//! receive the resulting [`Time`] snapshot by value.

/// Timing snapshot for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    /// Seconds since the previous frame, clamped to 0.1 so a stall doesn't
    /// produce a huge simulation step.
    pub delta: f32,
    /// Seconds since the clock was created.
    pub total: f32,
    /// Frames completed before this one.
    pub frame_count: u64,
}

/// Stateful clock producing [`Time`] snapshots.
pub struct FrameClock {
    start: std::time::Instant,
    last_tick: std::time::Instant,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = std::time::Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame_count: 0,
        }
    }

    /// Current snapshot without advancing the frame counter.  For callbacks
    /// off the hot frame path (setup, resize).
    pub fn peek(&self) -> Time {
        let now = std::time::Instant::now();
        Time {
            delta: (now - self.last_tick).as_secs_f32().min(0.1),
            total: (now - self.start).as_secs_f32(),
            frame_count: self.frame_count,
        }
    }

    /// Advances by one frame and returns the snapshot for it.
    pub fn tick(&mut self) -> Time {
        let now = std::time::Instant::now();
        let snapshot = Time {
            delta: (now - self.last_tick).as_secs_f32().min(0.1),
            total: (now - self.start).as_secs_f32(),
            frame_count: self.frame_count,
        };
        self.last_tick = now;
        self.frame_count += 1;
        snapshot
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_frame_count() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_count, 0);
        assert_eq!(clock.tick().frame_count, 1);
        assert_eq!(clock.peek().frame_count, 2);
    }

    #[test]
    fn total_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick().total;
        let b = clock.tick().total;
        assert!(b >= a);
    }
}
