//! Pinchmouse Processing Core
//!
//! Turns noisy per-frame fingertip positions into pointer input:
//! - **Adaptive Filter:** velocity-adaptive low-pass smoothing per axis
//! - **Cursor Motion:** deadzone, gain, velocity smoothing, speed clamp, screen clamping
//! - **Pinch Gestures:** click vs. drag state machine
//! - **Pipeline:** per-frame composition with hand-loss handling
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All timestamps are supplied by the caller, so identical input histories
//! always produce identical outputs.

pub mod cursor_motion;
pub mod one_euro;
pub mod pinch;
pub mod pipeline;

pub use cursor_motion::CursorMotionController;
pub use one_euro::{AdaptiveFilter, AdaptiveFilter2D};
pub use pinch::PinchGestureStateMachine;
pub use pipeline::HandPipeline;
