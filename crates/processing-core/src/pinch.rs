//! Pinch gesture state machine: click vs. drag disambiguation.
//!
//! ```text
//!            pinch                 held > click time
//!   Idle ─────────────▶ Held ──── or moved > drag distance ───▶ Dragging
//!    ▲                   │  (DragStart)                            │
//!    │     release       │                          release        │
//!    └─── (Click) ───────┘◀──────────────── (DragEnd) ─────────────┘
//! ```
//!
//! A fresh pinch is ambiguous, so nothing is emitted until it either
//! releases (click) or outlasts/outmoves the thresholds (drag).

use pinchmouse_common::config::GestureConfig;
use pinchmouse_common::error::PinchmouseResult;
use pinchmouse_model::gesture::GestureEvent;
use pinchmouse_model::landmark::{HandLandmarks, Point2D};

/// Phase of the pinch automaton. The pinch start is recorded exactly while
/// the phase is not `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PinchPhase {
    #[default]
    Idle,
    /// Pinching, not yet classified.
    Held { start_time: f64, start_pos: Point2D },
    /// Pinching and classified as a drag.
    Dragging { start_time: f64, start_pos: Point2D },
}

impl PinchPhase {
    pub fn start_time(&self) -> Option<f64> {
        match self {
            PinchPhase::Idle => None,
            PinchPhase::Held { start_time, .. } | PinchPhase::Dragging { start_time, .. } => {
                Some(*start_time)
            }
        }
    }

    pub fn start_pos(&self) -> Option<Point2D> {
        match self {
            PinchPhase::Idle => None,
            PinchPhase::Held { start_pos, .. } | PinchPhase::Dragging { start_pos, .. } => {
                Some(*start_pos)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PinchPhase::Idle => "idle",
            PinchPhase::Held { .. } => "held",
            PinchPhase::Dragging { .. } => "dragging",
        }
    }
}

/// True iff the thumb tip and middle fingertip are closer than
/// `pinch_threshold`.
pub fn detect_pinch(config: &GestureConfig, landmarks: &HandLandmarks) -> bool {
    landmarks.thumb_tip().distance_to(&landmarks.middle_tip()) < config.pinch_threshold
}

/// The transition function: next phase and the event it emits.
pub fn transition(
    config: &GestureConfig,
    phase: PinchPhase,
    pinch_now: bool,
    current_pos: Point2D,
    now: f64,
) -> (PinchPhase, GestureEvent) {
    match (phase, pinch_now) {
        (PinchPhase::Idle, false) => (PinchPhase::Idle, GestureEvent::None),
        (PinchPhase::Idle, true) => (
            PinchPhase::Held {
                start_time: now,
                start_pos: current_pos,
            },
            GestureEvent::None,
        ),
        (
            PinchPhase::Held {
                start_time,
                start_pos,
            },
            true,
        ) => {
            let elapsed = now - start_time;
            let moved = current_pos.distance_to(&start_pos);
            if elapsed > config.click_time_threshold || moved > config.drag_distance_threshold {
                (
                    PinchPhase::Dragging {
                        start_time,
                        start_pos,
                    },
                    GestureEvent::DragStart,
                )
            } else {
                (phase, GestureEvent::None)
            }
        }
        (PinchPhase::Dragging { .. }, true) => (phase, GestureEvent::Dragging),
        (PinchPhase::Held { .. }, false) => (PinchPhase::Idle, GestureEvent::Click),
        (PinchPhase::Dragging { .. }, false) => (PinchPhase::Idle, GestureEvent::DragEnd),
    }
}

/// Click/drag recognizer for the single pinch channel.
#[derive(Debug, Clone)]
pub struct PinchGestureStateMachine {
    config: GestureConfig,
    phase: PinchPhase,
}

impl PinchGestureStateMachine {
    pub fn new(config: GestureConfig) -> PinchmouseResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            phase: PinchPhase::Idle,
        })
    }

    pub fn detect_pinch(&self, landmarks: &HandLandmarks) -> bool {
        detect_pinch(&self.config, landmarks)
    }

    /// Advance by one frame. Exactly one event (possibly `None`) per call.
    pub fn update(&mut self, pinch_now: bool, current_pos: Point2D, now: f64) -> GestureEvent {
        let (next, event) = transition(&self.config, self.phase, pinch_now, current_pos, now);
        if next.name() != self.phase.name() {
            tracing::debug!(
                from = self.phase.name(),
                to = next.name(),
                event = event.label(),
                t = now,
                "Pinch phase changed"
            );
        }
        self.phase = next;
        event
    }

    /// Force `Idle` without emitting anything (hand lost).
    pub fn reset(&mut self) {
        if self.phase != PinchPhase::Idle {
            tracing::debug!(from = self.phase.name(), "Pinch state reset");
        }
        self.phase = PinchPhase::Idle;
    }

    pub fn phase(&self) -> PinchPhase {
        self.phase
    }
}
