//! Hand trace types.
//!
//! A trace is the per-frame output of the hand-tracking collaborator, stored
//! as JSONL: an optional `# {header}` comment line followed by one
//! [`HandFrame`] per line.

use serde::{Deserialize, Serialize};

use crate::landmark::{HandLandmarks, Point2D};

/// One frame reported by the hand-tracking collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    /// Seconds since session start.
    #[serde(rename = "t")]
    pub timestamp_secs: f64,

    /// Landmarks of the tracked hand, or `None` when no hand was detected.
    #[serde(default)]
    pub landmarks: Option<HandLandmarks>,
}

/// Trace metadata, written as the first line of a trace file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time the trace was created (RFC 3339).
    pub created_wall: String,

    /// Nominal frame rate of the capture loop (Hz).
    pub frame_rate_hz: f64,

    /// Free-form description of where the frames came from.
    #[serde(default)]
    pub source: String,
}

impl HandFrame {
    /// A frame with a detected hand.
    pub fn present(timestamp_secs: f64, landmarks: HandLandmarks) -> Self {
        Self {
            timestamp_secs,
            landmarks: Some(landmarks),
        }
    }

    /// A frame in which no hand was detected.
    pub fn absent(timestamp_secs: f64) -> Self {
        Self {
            timestamp_secs,
            landmarks: None,
        }
    }

    pub fn hand_present(&self) -> bool {
        self.landmarks.is_some()
    }

    /// Raw index fingertip position, if a hand is present.
    pub fn index_tip(&self) -> Option<Point2D> {
        self.landmarks.as_ref().map(HandLandmarks::index_tip)
    }
}

impl TraceHeader {
    pub const SCHEMA_VERSION: &'static str = "1.0";

    pub fn new(
        created_wall: impl Into<String>,
        frame_rate_hz: f64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            schema_version: Self::SCHEMA_VERSION.to_string(),
            created_wall: created_wall.into(),
            frame_rate_hz,
            source: source.into(),
        }
    }
}

/// Parse frames from JSONL content, skipping blank and `#` lines.
pub fn parse_frames(jsonl: &str) -> Result<Vec<HandFrame>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Extract the header from the first `# ` line, if present.
pub fn parse_header(jsonl: &str) -> Option<Result<TraceHeader, serde_json::Error>> {
    jsonl
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.strip_prefix('#'))
        .map(|json| serde_json::from_str(json.trim()))
}

/// Serialize a header and frames to JSONL.
pub fn serialize_trace(
    header: &TraceHeader,
    frames: &[HandFrame],
) -> Result<String, serde_json::Error> {
    let mut output = format!("# {}\n", serde_json::to_string(header)?);
    output.push_str(&serialize_frames(frames)?);
    Ok(output)
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[HandFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}
