//! Gesture events and the pointer-device actions they map to.

use serde::{Deserialize, Serialize};

/// Discrete outcome of one gesture-machine update.
///
/// Produced fresh every frame, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GestureEvent {
    /// No pinch activity worth reporting.
    #[default]
    None,
    /// A short pinch that was released before turning into a drag.
    Click,
    /// A held pinch just became a drag.
    DragStart,
    /// A drag is in progress.
    Dragging,
    /// A drag was released.
    DragEnd,
}

/// An action for the pointer-injection collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceAction {
    /// Move the pointer to absolute screen pixels.
    MoveTo { x: i32, y: i32 },
    /// Press and release the primary button.
    Click,
    /// Press the primary button and keep it down.
    ButtonDown,
    /// Release the primary button.
    ButtonUp,
}

/// Everything the pipeline produces for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Timestamp of the frame this output was computed from (seconds).
    #[serde(rename = "t")]
    pub timestamp_secs: f64,

    /// Absolute cursor position in real-valued screen pixels. `None` when
    /// no hand was present.
    pub cursor: Option<(f64, f64)>,

    /// Gesture event for this frame.
    pub gesture: GestureEvent,
}

impl FrameOutput {
    pub fn hand_present(&self) -> bool {
        self.cursor.is_some()
    }

    /// Device actions for this frame, in injection order.
    ///
    /// A frame without a hand always releases the button so a drag can
    /// never stay stuck down across a tracking gap.
    pub fn device_actions(&self) -> Vec<DeviceAction> {
        match self.cursor {
            Some((x, y)) => {
                let mut actions = vec![DeviceAction::move_to(x, y)];
                actions.extend_from_slice(self.gesture.device_actions());
                actions
            }
            None => vec![DeviceAction::ButtonUp],
        }
    }
}

impl GestureEvent {
    /// Button actions for this event. `Dragging` keeps the button down and
    /// needs no new action.
    pub fn device_actions(self) -> &'static [DeviceAction] {
        match self {
            GestureEvent::Click => &[DeviceAction::Click],
            GestureEvent::DragStart => &[DeviceAction::ButtonDown],
            GestureEvent::DragEnd => &[DeviceAction::ButtonUp],
            GestureEvent::Dragging | GestureEvent::None => &[],
        }
    }

    /// Short label for logs and overlays.
    pub fn label(self) -> &'static str {
        match self {
            GestureEvent::None => "none",
            GestureEvent::Click => "click",
            GestureEvent::DragStart => "drag_start",
            GestureEvent::Dragging => "dragging",
            GestureEvent::DragEnd => "drag_end",
        }
    }
}

impl DeviceAction {
    /// Move action for real-valued cursor coordinates, rounded to the
    /// nearest pixel.
    pub fn move_to(x: f64, y: f64) -> Self {
        DeviceAction::MoveTo {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }
}
