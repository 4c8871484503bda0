//! Replay a hand trace through the pipeline.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use pinchmouse_common::clock::{FrameRateMeter, SessionClock};
use pinchmouse_model::trace::{parse_frames, parse_header, HandFrame};
use pinchmouse_pointer_output::{dispatch, ActionStreamHeader, ActionWriter, PointerSink};
use pinchmouse_processing_core::HandPipeline;

use crate::TuningArgs;

pub fn run(trace: PathBuf, output: Option<PathBuf>, tuning: &TuningArgs) -> anyhow::Result<()> {
    let config = super::resolve_config(tuning)?;

    let content = std::fs::read_to_string(&trace)
        .with_context(|| format!("Failed to read trace {}", trace.display()))?;

    if let Some(header) = parse_header(&content) {
        let header = header.context("Failed to parse trace header")?;
        tracing::info!(
            schema = %header.schema_version,
            created = %header.created_wall,
            frame_rate_hz = header.frame_rate_hz,
            source = %header.source,
            "Trace header"
        );
    }

    let frames = parse_frames(&content).context("Failed to parse trace frames")?;
    tracing::info!(frames = frames.len(), trace = %trace.display(), "Loaded trace");

    let header = ActionStreamHeader::new(
        config.screen.width,
        config.screen.height,
        Some(trace.display().to_string()),
    );
    let clock = SessionClock::start();
    let mut pipeline = HandPipeline::new(&config)?;
    let actions = match &output {
        Some(path) => {
            let mut writer = ActionWriter::create(path, &header)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            replay_into(&mut pipeline, &frames, &mut writer)?
        }
        None => {
            let mut writer = ActionWriter::new(std::io::stdout().lock(), &header)?;
            replay_into(&mut pipeline, &frames, &mut writer)?
        }
    };

    let stats = pipeline.stats();
    tracing::info!(
        frames = stats.frames,
        frames_without_hand = stats.frames_without_hand,
        clicks = stats.clicks,
        drags = stats.drags,
        actions,
        elapsed_secs = clock.elapsed_secs(),
        "Replay complete"
    );

    if let Some(path) = output {
        eprintln!(
            "Replayed {} frames: {} clicks, {} drags, {} actions -> {}",
            stats.frames,
            stats.clicks,
            stats.drags,
            actions,
            path.display()
        );
    }

    Ok(())
}

/// Run every frame through `pipeline`, delivering actions to `writer`.
fn replay_into<W: Write>(
    pipeline: &mut HandPipeline,
    frames: &[HandFrame],
    writer: &mut ActionWriter<W>,
) -> anyhow::Result<usize> {
    let mut meter = FrameRateMeter::default();
    let mut actions = 0usize;

    for frame in frames {
        let out = pipeline.process(frame);
        actions += dispatch(&out, writer)?;
        if let Some(fps) = meter.tick(frame.timestamp_secs) {
            tracing::debug!(t = frame.timestamp_secs, fps, "Trace frame rate");
        }
    }
    writer.flush()?;
    tracing::debug!(sink = writer.name(), written = writer.actions_written(), "Actions flushed");

    Ok(actions)
}
