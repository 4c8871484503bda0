//! JSONL device-action writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use pinchmouse_common::error::{PinchmouseError, PinchmouseResult};
use pinchmouse_model::gesture::DeviceAction;

use crate::PointerSink;

/// Metadata written as the first line of an action stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Screen the actions target, in pixels.
    pub screen_width: f64,
    pub screen_height: f64,

    /// Trace the actions were computed from, if any.
    #[serde(default)]
    pub source: Option<String>,
}

impl ActionStreamHeader {
    pub fn new(screen_width: f64, screen_height: f64, source: Option<String>) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            screen_width,
            screen_height,
            source,
        }
    }
}

/// Writes device actions as JSONL lines.
pub struct ActionWriter<W: Write = File> {
    writer: BufWriter<W>,
    actions_written: u64,
}

impl ActionWriter<File> {
    /// Create (truncating) a file writer, writing the header as the first line.
    pub fn create(path: &Path, header: &ActionStreamHeader) -> PinchmouseResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Self::new(file, header)
    }
}

impl<W: Write> ActionWriter<W> {
    /// Wrap any writer, writing the header as the first line.
    pub fn new(inner: W, header: &ActionStreamHeader) -> PinchmouseResult<Self> {
        let mut writer = BufWriter::new(inner);

        // Header as a comment line (prefixed with #)
        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| PinchmouseError::output(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            actions_written: 0,
        })
    }

    /// Write a single action as a JSONL line.
    pub fn write_action(&mut self, action: &DeviceAction) -> PinchmouseResult<()> {
        let json = serde_json::to_string(action)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| PinchmouseError::output(format!("Failed to write action: {e}")))?;
        self.actions_written += 1;

        if self.actions_written % 1000 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes.
    pub fn flush(&mut self) -> PinchmouseResult<()> {
        self.writer
            .flush()
            .map_err(|e| PinchmouseError::output(format!("Failed to flush actions: {e}")))
    }

    /// Number of actions written.
    pub fn actions_written(&self) -> u64 {
        self.actions_written
    }
}

impl<W: Write> PointerSink for ActionWriter<W> {
    fn move_to(&mut self, x: i32, y: i32) -> PinchmouseResult<()> {
        self.write_action(&DeviceAction::MoveTo { x, y })
    }

    fn click(&mut self) -> PinchmouseResult<()> {
        self.write_action(&DeviceAction::Click)
    }

    fn button_down(&mut self) -> PinchmouseResult<()> {
        self.write_action(&DeviceAction::ButtonDown)
    }

    fn button_up(&mut self) -> PinchmouseResult<()> {
        self.write_action(&DeviceAction::ButtonUp)
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}

impl<W: Write> Drop for ActionWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Parse an action stream, skipping blank and `#` lines.
pub fn parse_actions(jsonl: &str) -> Result<Vec<DeviceAction>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}
