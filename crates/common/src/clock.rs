//! Clock and timing utilities.
//!
//! Pipeline components never read a clock themselves: every timestamp is
//! supplied by the caller as seconds since session start. This module provides:
//! - A session clock that produces those timestamps for live capture loops
//! - A frame-rate meter driven by caller-supplied timestamps

use std::time::Instant;

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment tracking started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

/// Measures frames per second over fixed-size windows of frames.
#[derive(Debug)]
pub struct FrameRateMeter {
    window: u32,
    frames_in_window: u32,
    window_start_secs: Option<f64>,
}

impl FrameRateMeter {
    /// Frames per reading.
    pub const DEFAULT_WINDOW: u32 = 30;

    /// Create a meter that reports once every `window` frames.
    pub fn new(window: u32) -> Self {
        Self {
            window: window.max(1),
            frames_in_window: 0,
            window_start_secs: None,
        }
    }

    /// Register a frame at `timestamp_secs`.
    ///
    /// Returns a reading when the current window completes. A window whose
    /// elapsed time is not positive reports `0.0`.
    pub fn tick(&mut self, timestamp_secs: f64) -> Option<f64> {
        let start = match self.window_start_secs {
            None => {
                self.window_start_secs = Some(timestamp_secs);
                return None;
            }
            Some(start) => start,
        };

        self.frames_in_window += 1;
        if self.frames_in_window < self.window {
            return None;
        }

        let elapsed = timestamp_secs - start;
        let fps = if elapsed > 0.0 {
            self.frames_in_window as f64 / elapsed
        } else {
            0.0
        };
        self.frames_in_window = 0;
        self.window_start_secs = Some(timestamp_secs);
        Some(fps)
    }
}

impl Default for FrameRateMeter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = SessionClock::start();
        assert!(clock.elapsed_secs() < 1.0);
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_frame_rate_meter_reports_per_window() {
        let mut meter = FrameRateMeter::new(30);
        let mut readings = vec![];
        for i in 0..=60 {
            if let Some(fps) = meter.tick(i as f64 / 60.0) {
                readings.push(fps);
            }
        }
        assert_eq!(readings.len(), 2);
        for fps in readings {
            assert!((fps - 60.0).abs() < 1e-6, "fps={fps}");
        }
    }

    #[test]
    fn test_frame_rate_meter_zero_elapsed() {
        let mut meter = FrameRateMeter::new(2);
        assert_eq!(meter.tick(1.0), None);
        assert_eq!(meter.tick(1.0), None);
        assert_eq!(meter.tick(1.0), Some(0.0));
    }
}
