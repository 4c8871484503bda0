//! Pinchmouse Pointer Output
//!
//! The seam between the pipeline and whatever injects pointer input into the
//! host. Each frame's [`FrameOutput`] is turned into device actions and
//! delivered to a pluggable [`PointerSink`]:
//!
//! - **RecordingSink:** keeps actions in memory (tests, dry runs)
//! - **ActionWriter:** appends actions to a JSONL stream
//!
//! A frame without a hand always releases the button, whatever the gesture
//! state was, so a drag can never stay stuck down.

pub mod writer;

use pinchmouse_common::error::PinchmouseResult;
use pinchmouse_model::gesture::{DeviceAction, FrameOutput};

pub use writer::{parse_actions, ActionStreamHeader, ActionWriter};

/// Trait for pointer-injection backends.
pub trait PointerSink {
    /// Move the pointer to absolute screen pixels.
    fn move_to(&mut self, x: i32, y: i32) -> PinchmouseResult<()>;

    /// Press and release the primary button.
    fn click(&mut self) -> PinchmouseResult<()>;

    /// Press the primary button and hold it.
    fn button_down(&mut self) -> PinchmouseResult<()>;

    /// Release the primary button.
    fn button_up(&mut self) -> PinchmouseResult<()>;

    /// Sink name for logging.
    fn name(&self) -> &str;

    /// Deliver one action.
    fn apply(&mut self, action: DeviceAction) -> PinchmouseResult<()> {
        match action {
            DeviceAction::MoveTo { x, y } => self.move_to(x, y),
            DeviceAction::Click => self.click(),
            DeviceAction::ButtonDown => self.button_down(),
            DeviceAction::ButtonUp => self.button_up(),
        }
    }
}

/// Deliver every action for `output` to `sink`, in order. Returns the
/// number of actions delivered.
pub fn dispatch(output: &FrameOutput, sink: &mut dyn PointerSink) -> PinchmouseResult<usize> {
    let actions = output.device_actions();
    for action in &actions {
        sink.apply(*action)?;
    }
    if !output.hand_present() {
        tracing::trace!(sink = sink.name(), t = output.timestamp_secs, "Forced button release");
    }
    Ok(actions.len())
}

/// Sink that records every action in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    actions: Vec<DeviceAction>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[DeviceAction] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<DeviceAction> {
        self.actions
    }
}

impl PointerSink for RecordingSink {
    fn move_to(&mut self, x: i32, y: i32) -> PinchmouseResult<()> {
        self.actions.push(DeviceAction::MoveTo { x, y });
        Ok(())
    }

    fn click(&mut self) -> PinchmouseResult<()> {
        self.actions.push(DeviceAction::Click);
        Ok(())
    }

    fn button_down(&mut self) -> PinchmouseResult<()> {
        self.actions.push(DeviceAction::ButtonDown);
        Ok(())
    }

    fn button_up(&mut self) -> PinchmouseResult<()> {
        self.actions.push(DeviceAction::ButtonUp);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
