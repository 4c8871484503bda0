//! Pinchmouse Data Model
//!
//! Defines the data contracts exchanged with the pipeline's collaborators:
//! - **Landmarks:** Normalized hand landmark positions and fingertip indices
//! - **Gestures:** Per-frame gesture events and the device actions they map to
//! - **Traces:** Timestamped hand frames stored as JSONL
//!
//! All landmark coordinates are normalized to `[0.0, 1.0]` relative to the
//! camera frame. Cursor coordinates are screen pixels.

pub mod gesture;
pub mod landmark;
pub mod trace;

pub use gesture::*;
pub use landmark::*;
pub use trace::*;
