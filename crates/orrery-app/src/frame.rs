//! Frame timing: elapsed-time measurement and display statistics.

use std::time::Instant;

/// Measures elapsed wall-clock time between frames.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    /// Start the clock at the current instant.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Milliseconds since the previous tick (or since construction).
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.last).as_secs_f64() * 1000.0;
        self.last = now;
        elapsed_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Running frame statistics, for display only.
///
/// Keeps the running average of frame durations over the whole session and
/// the instantaneous FPS of the latest frame.
pub struct FrameStats {
    average_ms: f64,
    frames: u64,
    fps: f64,
}

impl FrameStats {
    /// Fresh statistics with no recorded frames.
    pub fn new() -> Self {
        Self {
            average_ms: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Fold one frame duration into the running average.
    pub fn record(&mut self, elapsed_ms: f64) {
        self.average_ms =
            (self.average_ms * self.frames as f64 + elapsed_ms) / (self.frames as f64 + 1.0);
        self.frames += 1;
        if elapsed_ms > 0.0 {
            self.fps = 1000.0 / elapsed_ms;
        }
    }

    /// Running average frame duration in milliseconds.
    pub fn average_ms(&self) -> f64 {
        self.average_ms
    }

    /// Instantaneous FPS of the latest non-empty frame.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Number of recorded frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame_sets_average_and_fps() {
        let mut stats = FrameStats::new();
        stats.record(16.0);
        assert!((stats.average_ms() - 16.0).abs() < 1e-12);
        assert!((stats.fps() - 62.5).abs() < 1e-9);
        assert_eq!(stats.frames(), 1);
    }

    #[test]
    fn test_running_average_over_mixed_frames() {
        let mut stats = FrameStats::new();
        stats.record(16.0);
        stats.record(32.0);
        assert!((stats.average_ms() - 24.0).abs() < 1e-12);

        stats.record(12.0);
        assert!((stats.average_ms() - 20.0).abs() < 1e-12);
        assert_eq!(stats.frames(), 3);
    }

    #[test]
    fn test_fps_tracks_latest_frame() {
        let mut stats = FrameStats::new();
        stats.record(16.0);
        stats.record(40.0);
        assert!((stats.fps() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_does_not_blow_up_fps() {
        let mut stats = FrameStats::new();
        stats.record(20.0);
        stats.record(0.0);
        assert!(stats.fps().is_finite());
        assert!((stats.fps() - 50.0).abs() < 1e-9);
        // The zero frame still participates in the average.
        assert!((stats.average_ms() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_clock_measures_forward_time() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        let second = clock.tick();
        assert!(first >= 0.0);
        assert!(second >= 0.0);
    }
}
