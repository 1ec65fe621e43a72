//! Frame timing utilities

use std::time::Instant;

/// Wall-clock frame timer for host loops
///
/// Measures the real time between consecutive [`FrameClock::tick`] calls and
/// keeps running totals for FPS reporting. The simulation itself never reads
/// the wall clock; hosts pass the measured delta into `Sandbox::frame`.
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock whose first tick measures from now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance one frame and return the elapsed seconds since the previous tick
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Seconds measured by the most recent tick
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second based on the last tick
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.current_fps(), 0.0);

        let first = clock.tick();
        let second = clock.tick();

        assert!(first >= 0.0 && second >= 0.0);
        assert_eq!(clock.frame_count(), 2);
        assert_eq!(clock.delta_time(), second);
    }
}
