//! Per-frame composition of filter, motion controller, and gesture machine.

use pinchmouse_common::config::AppConfig;
use pinchmouse_common::error::PinchmouseResult;
use pinchmouse_model::gesture::{FrameOutput, GestureEvent};
use pinchmouse_model::trace::HandFrame;

use crate::cursor_motion::CursorMotionController;
use crate::one_euro::AdaptiveFilter2D;
use crate::pinch::PinchGestureStateMachine;

/// Running counters for one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineStats {
    pub frames: u64,
    pub frames_without_hand: u64,
    pub clicks: u64,
    pub drags: u64,
}

/// One tracking session's pipeline.
///
/// The filter, cursor, and gesture stages share no state; they only meet
/// here, where each frame is fanned out to them.
#[derive(Debug, Clone)]
pub struct HandPipeline {
    filter: AdaptiveFilter2D,
    motion: CursorMotionController,
    gesture: PinchGestureStateMachine,
    hand_present: bool,
    stats: PipelineStats,
}

impl HandPipeline {
    /// Validate `config` and build every stage.
    pub fn new(config: &AppConfig) -> PinchmouseResult<Self> {
        config.validate()?;
        let pipeline = Self {
            filter: AdaptiveFilter2D::new(config.filter)?,
            motion: CursorMotionController::new(config.motion, config.screen)?,
            gesture: PinchGestureStateMachine::new(config.gesture)?,
            hand_present: false,
            stats: PipelineStats::default(),
        };
        tracing::info!(
            screen_width = config.screen.width,
            screen_height = config.screen.height,
            min_cutoff = config.filter.min_cutoff,
            beta = config.filter.beta,
            gain = config.motion.gain,
            velocity_smoothing = config.motion.velocity_smoothing,
            "Hand pipeline initialized"
        );
        Ok(pipeline)
    }

    /// Process one frame from the hand-tracking collaborator.
    pub fn process(&mut self, frame: &HandFrame) -> FrameOutput {
        self.stats.frames += 1;
        let t = frame.timestamp_secs;

        let Some(hand) = frame.landmarks.as_ref() else {
            if self.hand_present {
                tracing::debug!(t, "Hand lost");
            }
            self.hand_present = false;
            self.stats.frames_without_hand += 1;
            self.motion.on_hand_lost();
            self.gesture.reset();
            return FrameOutput {
                timestamp_secs: t,
                cursor: None,
                gesture: GestureEvent::None,
            };
        };

        if !self.hand_present {
            tracing::debug!(t, "Hand acquired");
        }
        self.hand_present = true;

        let raw = hand.index_tip();
        let filtered = self.filter.filter(raw, t);
        let cursor = self.motion.update(filtered.x, filtered.y);
        tracing::trace!(t, x = cursor.0, y = cursor.1, "Cursor updated");

        let pinch_now = self.gesture.detect_pinch(hand);
        let gesture = self.gesture.update(pinch_now, raw, t);
        match gesture {
            GestureEvent::Click => self.stats.clicks += 1,
            GestureEvent::DragStart => self.stats.drags += 1,
            _ => {}
        }

        FrameOutput {
            timestamp_secs: t,
            cursor: Some(cursor),
            gesture,
        }
    }

    /// Process a whole trace in order.
    pub fn process_all(&mut self, frames: &[HandFrame]) -> Vec<FrameOutput> {
        frames.iter().map(|frame| self.process(frame)).collect()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn motion(&self) -> &CursorMotionController {
        &self.motion
    }

    pub fn gesture(&self) -> &PinchGestureStateMachine {
        &self.gesture
    }

    pub fn filter(&self) -> &AdaptiveFilter2D {
        &self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinchmouse_model::landmark::{HandLandmarks, Point2D};

    fn hand(index: Point2D, pinched: bool) -> HandLandmarks {
        let thumb = Point2D::new(0.3, 0.3);
        let middle = if pinched {
            Point2D::new(0.31, 0.3)
        } else {
            Point2D::new(0.3, 0.45)
        };
        HandLandmarks::uniform(
            Point2D::new(0.5, 0.8),
            &[
                (HandLandmarks::THUMB_TIP, thumb),
                (HandLandmarks::INDEX_TIP, index),
                (HandLandmarks::MIDDLE_TIP, middle),
            ],
        )
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.screen.height = 0.0;
        assert!(HandPipeline::new(&config).is_err());
    }

    #[test]
    fn test_first_frame_leaves_cursor_centered() {
        let mut pipeline = HandPipeline::new(&AppConfig::default()).unwrap();
        let frame = HandFrame::present(0.0, hand(Point2D::new(0.2, 0.7), false));
        let out = pipeline.process(&frame);
        assert_eq!(out.cursor, Some((960.0, 540.0)));
        assert_eq!(out.gesture, GestureEvent::None);
    }

    #[test]
    fn test_hand_loss_resets_velocity_and_gesture() {
        let mut pipeline = HandPipeline::new(&AppConfig::default()).unwrap();
        let frames = [
            HandFrame::present(0.0, hand(Point2D::new(0.5, 0.5), false)),
            HandFrame::present(1.0 / 60.0, hand(Point2D::new(0.6, 0.5), true)),
            HandFrame::present(2.0 / 60.0, hand(Point2D::new(0.7, 0.5), true)),
        ];
        pipeline.process_all(&frames);
        assert_ne!(pipeline.motion().state().velocity(), (0.0, 0.0));
        assert_ne!(pipeline.gesture().phase().name(), "idle");
        let cursor_before = pipeline.motion().position();

        let out = pipeline.process(&HandFrame::absent(3.0 / 60.0));
        assert_eq!(out.cursor, None);
        assert_eq!(out.gesture, GestureEvent::None);
        assert_eq!(pipeline.motion().state().velocity(), (0.0, 0.0));
        assert_eq!(pipeline.gesture().phase().name(), "idle");
        assert_eq!(pipeline.motion().position(), cursor_before);
        assert!(pipeline.filter().x.state().is_bootstrapped());
    }

    #[test]
    fn test_stats_count_frames_and_gestures() {
        let mut pipeline = HandPipeline::new(&AppConfig::default()).unwrap();
        let p = Point2D::new(0.5, 0.5);
        let frames = [
            HandFrame::present(0.0, hand(p, true)),
            HandFrame::present(0.05, hand(p, false)),
            HandFrame::absent(0.1),
            HandFrame::present(0.15, hand(p, true)),
            HandFrame::present(0.5, hand(p, true)),
            HandFrame::present(0.55, hand(p, false)),
        ];
        let events: Vec<_> = pipeline
            .process_all(&frames)
            .into_iter()
            .map(|o| o.gesture)
            .collect();
        assert_eq!(
            events,
            vec![
                GestureEvent::None,
                GestureEvent::Click,
                GestureEvent::None,
                GestureEvent::None,
                GestureEvent::DragStart,
                GestureEvent::DragEnd,
            ]
        );
        assert_eq!(
            pipeline.stats(),
            PipelineStats {
                frames: 6,
                frames_without_hand: 1,
                clicks: 1,
                drags: 1,
            }
        );
    }
}
