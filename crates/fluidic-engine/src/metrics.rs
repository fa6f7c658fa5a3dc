//! Frame-rate metrics for the driver loop.
//!
//! [`FrameCounter`] tracks the overall average frame rate and a recent
//! running average that forgets old frames quickly.

/// Recent-window length above which the window shrinks back.
const RECENT_WINDOW_MAX: u32 = 100;
/// Window length the recent average restarts from.
const RECENT_WINDOW_RESET: u32 = 5;

/// Frame timing accumulated across ticks.
#[derive(Clone, Debug, Default)]
pub struct FrameCounter {
    /// Frames recorded, including zero-length ones.
    total_frames: u64,
    /// Wall-clock seconds recorded.
    total_seconds: f64,
    /// Frames represented in the recent average.
    recent_frames: u32,
    /// Running mean frame duration over the recent window, in seconds.
    recent_mean: f64,
}

impl FrameCounter {
    /// An empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame that took `seconds`.
    ///
    /// Zero-length frames count toward the totals but not the recent
    /// average.
    pub fn notify_frame(&mut self, seconds: f64) {
        self.total_frames += 1;
        self.total_seconds += seconds;

        if seconds == 0.0 {
            return;
        }
        if self.recent_frames > RECENT_WINDOW_MAX {
            self.recent_frames = RECENT_WINDOW_RESET;
        }
        let n = f64::from(self.recent_frames);
        self.recent_frames += 1;
        self.recent_mean = (self.recent_mean * n + seconds) / f64::from(self.recent_frames);
    }

    /// Frames recorded.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Seconds recorded.
    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    /// Frames per second over the whole run, or `None` before any time
    /// has elapsed.
    pub fn average_fps(&self) -> Option<f64> {
        (self.total_seconds > 0.0).then(|| self.total_frames as f64 / self.total_seconds)
    }

    /// Frames per second over the recent window, or `None` before the
    /// first non-zero frame.
    pub fn recent_fps(&self) -> Option<f64> {
        (self.recent_frames > 0 && self.recent_mean > 0.0).then(|| 1.0 / self.recent_mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counter_has_no_rate() {
        let c = FrameCounter::new();
        assert_eq!(c.total_frames(), 0);
        assert_eq!(c.average_fps(), None);
        assert_eq!(c.recent_fps(), None);
    }

    #[test]
    fn steady_frames_give_steady_rate() {
        let mut c = FrameCounter::new();
        for _ in 0..10 {
            c.notify_frame(0.02);
        }
        assert_eq!(c.total_frames(), 10);
        assert!((c.average_fps().unwrap() - 50.0).abs() < 1e-9);
        assert!((c.recent_fps().unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_frames_count_only_toward_totals() {
        let mut c = FrameCounter::new();
        c.notify_frame(0.0);
        assert_eq!(c.total_frames(), 1);
        assert_eq!(c.recent_fps(), None);
        c.notify_frame(0.1);
        assert!((c.recent_fps().unwrap() - 10.0).abs() < 1e-9);
        assert!((c.average_fps().unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn recent_window_forgets_old_frames() {
        let mut c = FrameCounter::new();
        for _ in 0..101 {
            c.notify_frame(1.0);
        }
        for _ in 0..50 {
            c.notify_frame(0.01);
        }
        let recent = c.recent_fps().unwrap();
        let average = c.average_fps().unwrap();
        assert!(recent > 9.0, "recent = {recent}");
        assert!(average < 2.0, "average = {average}");
    }
}
