//! Hand landmark types.
//!
//! The hand-tracking collaborator reports a fixed, ordered set of 21
//! normalized points per detected hand.

use serde::{Deserialize, Serialize};

use pinchmouse_common::error::PinchmouseError;

/// A 2D normalized point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Linear interpolation between two points.
    pub fn lerp(a: &Point2D, b: &Point2D, t: f64) -> Point2D {
        let t = t.clamp(0.0, 1.0);
        Point2D {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

/// The 21 landmarks of one detected hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct HandLandmarks {
    points: [Point2D; HandLandmarks::COUNT],
}

impl HandLandmarks {
    /// Number of landmarks per hand.
    pub const COUNT: usize = 21;

    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_TIP: usize = 12;

    pub fn new(points: [Point2D; Self::COUNT]) -> Self {
        Self { points }
    }

    /// Build from a dynamically sized list, rejecting any other length.
    pub fn from_points(points: Vec<Point2D>) -> Result<Self, PinchmouseError> {
        let len = points.len();
        let points: [Point2D; Self::COUNT] = points.try_into().map_err(|_| {
            PinchmouseError::trace(format!(
                "expected {} hand landmarks, got {len}",
                Self::COUNT
            ))
        })?;
        Ok(Self { points })
    }

    /// Every landmark at the same position, with selected overrides.
    ///
    /// Useful for synthesizing hands where only a few fingertips matter.
    pub fn uniform(at: Point2D, overrides: &[(usize, Point2D)]) -> Self {
        let mut points = [at; Self::COUNT];
        for &(index, point) in overrides {
            if let Some(slot) = points.get_mut(index) {
                *slot = point;
            }
        }
        Self { points }
    }

    pub fn get(&self, index: usize) -> Option<&Point2D> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn thumb_tip(&self) -> Point2D {
        self.points[Self::THUMB_TIP]
    }

    /// The fingertip that drives the cursor.
    pub fn index_tip(&self) -> Point2D {
        self.points[Self::INDEX_TIP]
    }

    pub fn middle_tip(&self) -> Point2D {
        self.points[Self::MIDDLE_TIP]
    }
}

impl TryFrom<Vec<Point2D>> for HandLandmarks {
    type Error = PinchmouseError;

    fn try_from(points: Vec<Point2D>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

impl From<HandLandmarks> for Vec<Point2D> {
    fn from(hand: HandLandmarks) -> Self {
        hand.points.to_vec()
    }
}
