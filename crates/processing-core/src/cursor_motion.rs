//! Cursor motion control.
//!
//! Converts the filtered fingertip position into a bounded, speed-limited
//! absolute cursor position. The cursor moves relative to the fingertip's
//! last accepted position (the baseline), like a mouse rather than a
//! touchscreen.
//!
//! Per update:
//! 1. Seed the baseline on the first sample (no movement).
//! 2. Ignore changes inside the deadzone on both axes. The baseline is NOT
//!    moved, so slow drift accumulates until it crosses the deadzone.
//! 3. Scale the delta to pixels by `gain` and the screen size.
//! 4. Exponentially smooth the velocity.
//! 5. Clamp the speed to `max_speed`. A non-finite velocity drops the
//!    sample without touching any state.
//! 6. Move and clamp to the screen minus `edge_margin`.

use pinchmouse_common::config::{MotionConfig, ScreenConfig};
use pinchmouse_common::error::PinchmouseResult;

/// Mutable state of one cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorState {
    /// Cursor position in screen pixels.
    pub cursor_x: f64,
    pub cursor_y: f64,
    /// Last accepted normalized input position.
    baseline: Option<(f64, f64)>,
    /// Smoothed velocity in pixels per frame.
    pub smooth_vx: f64,
    pub smooth_vy: f64,
}

impl CursorState {
    /// A cursor at the center of `screen` with no baseline and no velocity.
    pub fn centered(screen: &ScreenConfig) -> Self {
        let (cursor_x, cursor_y) = screen.center();
        Self {
            cursor_x,
            cursor_y,
            baseline: None,
            smooth_vx: 0.0,
            smooth_vy: 0.0,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn baseline(&self) -> Option<(f64, f64)> {
        self.baseline
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.smooth_vx, self.smooth_vy)
    }
}

/// Advance `state` by one filtered input sample and return the cursor
/// position.
pub fn motion_step(
    config: &MotionConfig,
    screen: &ScreenConfig,
    state: &mut CursorState,
    filtered_x: f64,
    filtered_y: f64,
) -> (f64, f64) {
    let (base_x, base_y) = match state.baseline {
        None => {
            state.baseline = Some((filtered_x, filtered_y));
            return state.position();
        }
        Some(baseline) => baseline,
    };

    let dx = filtered_x - base_x;
    let dy = filtered_y - base_y;

    if dx.abs() < config.deadzone && dy.abs() < config.deadzone {
        return state.position();
    }

    let vx = dx * config.gain * screen.width;
    let vy = dy * config.gain * screen.height;

    let k = config.velocity_smoothing;
    let mut next_vx = k * state.smooth_vx + (1.0 - k) * vx;
    let mut next_vy = k * state.smooth_vy + (1.0 - k) * vy;

    let speed = next_vx.hypot(next_vy);
    if !speed.is_finite() {
        // Overflowed or NaN velocity: drop the sample, keep all state.
        tracing::trace!(dx, dy, "Non-finite cursor velocity, sample ignored");
        return state.position();
    }
    if speed > config.max_speed && speed > 0.0 {
        let scale = config.max_speed / speed;
        next_vx *= scale;
        next_vy *= scale;
    }
    state.smooth_vx = next_vx;
    state.smooth_vy = next_vy;

    let margin = config.edge_margin;
    state.cursor_x = (state.cursor_x + state.smooth_vx).clamp(margin, screen.width - margin);
    state.cursor_y = (state.cursor_y + state.smooth_vy).clamp(margin, screen.height - margin);

    state.baseline = Some((filtered_x, filtered_y));
    state.position()
}

/// Drop any carried velocity after a tracking gap. Position and baseline
/// are kept.
pub fn hand_lost(state: &mut CursorState) {
    state.smooth_vx = 0.0;
    state.smooth_vy = 0.0;
}

/// Cursor motion controller for one screen.
#[derive(Debug, Clone)]
pub struct CursorMotionController {
    config: MotionConfig,
    screen: ScreenConfig,
    state: CursorState,
}

impl CursorMotionController {
    /// Create a controller with the cursor at the screen center.
    pub fn new(config: MotionConfig, screen: ScreenConfig) -> PinchmouseResult<Self> {
        config.validate_for_screen(&screen)?;
        Ok(Self {
            state: CursorState::centered(&screen),
            config,
            screen,
        })
    }

    /// Feed one filtered, normalized fingertip position.
    pub fn update(&mut self, filtered_x: f64, filtered_y: f64) -> (f64, f64) {
        motion_step(
            &self.config,
            &self.screen,
            &mut self.state,
            filtered_x,
            filtered_y,
        )
    }

    pub fn on_hand_lost(&mut self) {
        hand_lost(&mut self.state);
    }

    pub fn position(&self) -> (f64, f64) {
        self.state.position()
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn screen(&self) -> &ScreenConfig {
        &self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn controller() -> CursorMotionController {
        CursorMotionController::new(MotionConfig::default(), ScreenConfig::default()).unwrap()
    }

    #[test]
    fn test_starts_at_screen_center() {
        let c = controller();
        assert_eq!(c.position(), (960.0, 540.0));
        assert_eq!(c.state().baseline(), None);
    }

    #[test]
    fn test_first_sample_only_sets_baseline() {
        let mut c = controller();
        assert_eq!(c.update(0.9, 0.1), (960.0, 540.0));
        assert_eq!(c.state().baseline(), Some((0.9, 0.1)));
        assert_eq!(c.state().velocity(), (0.0, 0.0));
    }

    #[test]
    fn test_deadzone_freezes_cursor_and_baseline() {
        let mut c = controller();
        c.update(0.5, 0.5);
        assert_eq!(c.update(0.5005, 0.4995), (960.0, 540.0));
        assert_eq!(c.update(0.5010, 0.5010), (960.0, 540.0));
        assert_eq!(c.state().baseline(), Some((0.5, 0.5)));
    }

    #[test]
    fn test_slow_drift_accumulates_against_frozen_baseline() {
        let mut c = controller();
        c.update(0.5, 0.5);
        c.update(0.5005, 0.5);
        c.update(0.5010, 0.5);
        let (x, y) = c.update(0.5016, 0.5);
        assert!(x > 960.0);
        assert_eq!(y, 540.0);
        assert_eq!(c.state().baseline(), Some((0.5016, 0.5)));
    }

    #[test]
    fn test_velocity_is_scaled_and_smoothed() {
        let mut c = controller();
        c.update(0.5, 0.5);
        let (x, y) = c.update(0.51, 0.5);
        // 0.01 * gain 3 * 1920 = 57.6 px, halved by smoothing 0.5
        let expected = 0.5 * 0.01 * 3.0 * 1920.0;
        assert!((x - (960.0 + expected)).abs() < 1e-6, "x={x}");
        assert_eq!(y, 540.0);
        assert!((c.state().velocity().0 - expected).abs() < 1e-6);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut c = controller();
        c.update(0.5, 0.5);
        c.update(0.7, 0.65);
        let (vx, vy) = c.state().velocity();
        assert!((vx.hypot(vy) - 35.0).abs() < 1e-9);
        // Direction is preserved
        let raw_ratio = (0.15 * 1080.0) / (0.2 * 1920.0);
        assert!((vy / vx - raw_ratio).abs() < 1e-9);
    }

    #[test]
    fn test_full_smoothing_never_moves() {
        let config = MotionConfig {
            velocity_smoothing: 1.0,
            ..Default::default()
        };
        let mut c = CursorMotionController::new(config, ScreenConfig::default()).unwrap();
        c.update(0.1, 0.1);
        assert_eq!(c.update(0.9, 0.9), (960.0, 540.0));
    }

    #[test]
    fn test_clamps_to_edge_margin() {
        let mut c = controller();
        c.update(0.5, 0.5);
        let mut x = 0.5;
        for _ in 0..200 {
            x -= 0.05;
            c.update(x, 0.5);
        }
        assert_eq!(c.position().0, 5.0);
    }

    #[test]
    fn test_hand_lost_zeroes_velocity_only() {
        let mut c = controller();
        c.update(0.5, 0.5);
        c.update(0.52, 0.47);
        let before = c.state().clone();
        assert_ne!(before.velocity(), (0.0, 0.0));

        c.on_hand_lost();
        assert_eq!(c.state().velocity(), (0.0, 0.0));
        assert_eq!(c.position(), before.position());
        assert_eq!(c.state().baseline(), before.baseline());
    }

    #[test]
    fn test_delta_equal_to_deadzone_moves() {
        let config = MotionConfig {
            deadzone: 0.25,
            max_speed: 1e6,
            ..Default::default()
        };
        let mut c = CursorMotionController::new(config, ScreenConfig::default()).unwrap();
        c.update(0.5, 0.5);
        let (x, y) = c.update(0.75, 0.5);
        assert!(x > 960.0, "x={x}");
        assert_eq!(y, 540.0);
        assert_eq!(c.state().baseline(), Some((0.75, 0.5)));
    }

    #[test]
    fn test_overflowing_delta_is_ignored() {
        let mut c = controller();
        c.update(0.5, 0.5);
        c.update(0.52, 0.5);
        let before = c.state().clone();

        assert_eq!(c.update(1e306, 0.5), before.position());
        assert_eq!(c.state(), &before);

        for x in [0.53, 0.54] {
            let (cx, cy) = c.update(x, 0.5);
            assert!(cx.is_finite() && cy.is_finite());
            assert!((5.0..=1915.0).contains(&cx), "cx={cx}");
        }
    }

    #[test]
    fn test_huge_gain_never_produces_nan() {
        let config = MotionConfig {
            gain: 1e306,
            ..Default::default()
        };
        let mut c = CursorMotionController::new(config, ScreenConfig::default()).unwrap();
        c.update(0.5, 0.5);
        for x in [0.6, 0.61, 0.62] {
            let (cx, cy) = c.update(x, 0.5);
            assert_eq!((cx, cy), (960.0, 540.0));
        }
        let (vx, vy) = c.state().velocity();
        assert!(vx.is_finite() && vy.is_finite());
    }

    #[test]
    fn test_rejects_invalid_screen() {
        let screen = ScreenConfig::new(-1.0, 1080.0);
        assert!(CursorMotionController::new(MotionConfig::default(), screen).is_err());
    }

    proptest! {
        #[test]
        fn prop_cursor_stays_inside_margins(
            samples in prop::collection::vec((-0.5f64..1.5, -0.5f64..1.5), 1..128),
            gain in 0.1f64..20.0,
            smoothing in 0.0f64..=1.0,
        ) {
            let config = MotionConfig {
                gain,
                velocity_smoothing: smoothing,
                max_speed: 500.0,
                ..Default::default()
            };
            let screen = ScreenConfig::new(800.0, 600.0);
            let mut c = CursorMotionController::new(config, screen).unwrap();
            for (x, y) in samples {
                let (cx, cy) = c.update(x, y);
                prop_assert!((5.0..=795.0).contains(&cx), "cx={}", cx);
                prop_assert!((5.0..=595.0).contains(&cy), "cy={}", cy);
            }
        }

        #[test]
        fn prop_extreme_inputs_stay_finite_and_inside(
            samples in prop::collection::vec((-1e308f64..1e308, -1e308f64..1e308), 1..64),
            gain in prop_oneof![Just(3.0f64), 1e200f64..1e306],
        ) {
            let config = MotionConfig { gain, ..Default::default() };
            let mut c = CursorMotionController::new(config, ScreenConfig::default()).unwrap();
            for (x, y) in samples {
                let (cx, cy) = c.update(x, y);
                prop_assert!((5.0..=1915.0).contains(&cx), "cx={}", cx);
                prop_assert!((5.0..=1075.0).contains(&cy), "cy={}", cy);
                let (vx, vy) = c.state().velocity();
                prop_assert!(vx.is_finite() && vy.is_finite());
            }
        }

        #[test]
        fn prop_speed_never_exceeds_max(
            samples in prop::collection::vec((0.0f64..1.0, 0.0f64..1.0), 2..64),
            max_speed in 1.0f64..100.0,
        ) {
            let config = MotionConfig { max_speed, ..Default::default() };
            let mut c = CursorMotionController::new(config, ScreenConfig::default()).unwrap();
            for (x, y) in samples {
                c.update(x, y);
                let (vx, vy) = c.state().velocity();
                prop_assert!(vx.hypot(vy) <= max_speed + 1e-9);
            }
        }
    }
}
