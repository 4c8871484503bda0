//! Generate a deterministic synthetic hand trace.
//!
//! The script runs, as fractions of the duration: an open-hand sweep, a
//! short pinch (click), a pinch held while moving (drag), a tracking gap,
//! and an open hand until the end.

use std::path::PathBuf;

use anyhow::Context;
use pinchmouse_common::clock::SessionClock;
use pinchmouse_model::landmark::{HandLandmarks, Point2D};
use pinchmouse_model::trace::{serialize_trace, HandFrame, TraceHeader};

const CLICK_START: f64 = 0.40;
const CLICK_HOLD_SECS: f64 = 0.1;
const DRAG_START: f64 = 0.55;
const DRAG_END: f64 = 0.75;
const GAP_START: f64 = 0.80;
const GAP_END: f64 = 0.85;

const JITTER: f64 = 0.0005;

pub fn run(output: Option<PathBuf>, fps: u32, seconds: f64) -> anyhow::Result<()> {
    if fps == 0 {
        anyhow::bail!("Frame rate must be positive");
    }
    if !(seconds.is_finite() && seconds > 0.0) {
        anyhow::bail!("Duration must be positive, got {seconds}");
    }

    let clock = SessionClock::start();
    let frames = synthetic_frames(fps, seconds);
    let header = TraceHeader::new(clock.epoch_wall(), f64::from(fps), "synthetic");
    let content = serialize_trace(&header, &frames)?;

    match &output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} frames -> {}", frames.len(), path.display());
        }
        None => print!("{content}"),
    }

    tracing::info!(frames = frames.len(), fps, seconds, "Synthetic trace generated");
    Ok(())
}

/// Frames at `fps` covering `seconds`.
fn synthetic_frames(fps: u32, seconds: f64) -> Vec<HandFrame> {
    let dt = 1.0 / f64::from(fps);
    let count = (seconds * f64::from(fps)).round() as usize;

    let sweep_from = Point2D::new(0.35, 0.40);
    let sweep_to = Point2D::new(0.65, 0.60);
    let drag_to = Point2D::new(0.45, 0.45);

    (0..count)
        .map(|i| {
            let t = i as f64 * dt;
            let p = t / seconds;

            let (tip, pinched) = if p < CLICK_START {
                (Point2D::lerp(&sweep_from, &sweep_to, p / CLICK_START), false)
            } else if p < DRAG_START {
                let in_click = t < CLICK_START * seconds + CLICK_HOLD_SECS;
                (sweep_to, in_click)
            } else if p < DRAG_END {
                let s = (p - DRAG_START) / (DRAG_END - DRAG_START);
                (Point2D::lerp(&sweep_to, &drag_to, s), true)
            } else if (GAP_START..GAP_END).contains(&p) {
                return HandFrame::absent(t);
            } else {
                (drag_to, false)
            };

            let jittered = Point2D::new(
                tip.x + JITTER * (i as f64 * 1.7).sin(),
                tip.y + JITTER * (i as f64 * 2.3).cos(),
            );
            HandFrame::present(t, hand_at(jittered, pinched))
        })
        .collect()
}

/// A hand with its index tip at `tip`. Pinching brings the middle tip onto
/// the thumb tip.
fn hand_at(tip: Point2D, pinched: bool) -> HandLandmarks {
    let thumb = Point2D::new(tip.x - 0.06, tip.y + 0.08);
    let middle = if pinched {
        Point2D::new(thumb.x + 0.01, thumb.y + 0.01)
    } else {
        Point2D::new(thumb.x + 0.05, thumb.y - 0.10)
    };

    HandLandmarks::uniform(
        Point2D::new(tip.x, tip.y + 0.3),
        &[
            (HandLandmarks::THUMB_TIP, thumb),
            (HandLandmarks::INDEX_TIP, tip),
            (HandLandmarks::MIDDLE_TIP, middle),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinchmouse_common::config::AppConfig;
    use pinchmouse_model::gesture::GestureEvent;
    use pinchmouse_processing_core::HandPipeline;

    #[test]
    fn test_synthetic_frame_count_and_gap() {
        let frames = synthetic_frames(60, 6.0);
        assert_eq!(frames.len(), 360);
        assert!(frames[0].hand_present());
        let absent = frames.iter().filter(|f| !f.hand_present()).count();
        assert!(absent > 0 && absent <= 20, "absent={absent}");
    }

    #[test]
    fn test_synthetic_trace_drives_click_and_drag() {
        let frames = synthetic_frames(60, 6.0);
        let mut pipeline = HandPipeline::new(&AppConfig::default()).unwrap();
        let events: Vec<GestureEvent> = pipeline
            .process_all(&frames)
            .into_iter()
            .map(|o| o.gesture)
            .collect();

        assert_eq!(events.iter().filter(|e| **e == GestureEvent::Click).count(), 1);
        assert_eq!(events.iter().filter(|e| **e == GestureEvent::DragStart).count(), 1);
        assert_eq!(events.iter().filter(|e| **e == GestureEvent::DragEnd).count(), 1);
        assert!(events.contains(&GestureEvent::Dragging));
    }
}
