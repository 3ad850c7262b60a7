//! Facial landmark model.
//!
//! Frames arrive as an ordered set of 68 points following the common
//! 68-point annotation: indices 36-41 left eye, 42-47 right eye, 60-67
//! inner mouth (all 0-based). The set is validated once at construction;
//! downstream ratio code can then index regions without re-checking.

use std::ops::Range;

use thiserror::Error;

/// 每帧关键点数量，68 点标注约定
pub const LANDMARK_COUNT: usize = 68;

const LEFT_EYE: Range<usize> = 36..42;
const RIGHT_EYE: Range<usize> = 42..48;
const MOUTH: Range<usize> = 60..68;

/// 二维点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Contract violations from the upstream landmark extractor.
#[derive(Debug, Error)]
pub enum LandmarkError {
    #[error("expected {LANDMARK_COUNT} landmarks, got {actual}")]
    WrongPointCount { actual: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

/// One frame's worth of facial landmarks, validated at construction.
///
/// Immutable once built; the pipeline passes it by reference, so a frame is
/// never copied into the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    /// Builds a set from already-constructed points.
    ///
    /// Rejects anything that is not exactly 68 finite points. A wrong-sized
    /// frame is an extractor bug and must never be silently truncated or
    /// padded.
    pub fn from_points(points: Vec<Point>) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongPointCount {
                actual: points.len(),
            });
        }
        for (index, p) in points.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(LandmarkError::NonFiniteCoordinate { index });
            }
        }
        Ok(Self { points })
    }

    /// Builds a set from raw `[x, y]` pairs, the shape replay records and
    /// detector bindings produce.
    pub fn from_coords(coords: Vec<[f64; 2]>) -> Result<Self, LandmarkError> {
        let points = coords.into_iter().map(|[x, y]| Point::new(x, y)).collect();
        Self::from_points(points)
    }

    pub fn left_eye(&self) -> EyeRegion<'_> {
        EyeRegion {
            points: &self.points[LEFT_EYE],
        }
    }

    pub fn right_eye(&self) -> EyeRegion<'_> {
        EyeRegion {
            points: &self.points[RIGHT_EYE],
        }
    }

    pub fn mouth(&self) -> MouthRegion<'_> {
        MouthRegion {
            points: &self.points[MOUTH],
        }
    }
}

/// Six eye points borrowed from a [`LandmarkSet`].
///
/// Region-local order: p0/p3 are the corners (horizontal axis), p1/p2 the
/// upper lid, p4/p5 the lower lid.
#[derive(Debug, Clone, Copy)]
pub struct EyeRegion<'a> {
    points: &'a [Point],
}

impl EyeRegion<'_> {
    /// Region-local point access, `i` in 0..6.
    pub fn p(&self, i: usize) -> Point {
        self.points[i]
    }
}

/// Eight inner-mouth points borrowed from a [`LandmarkSet`].
///
/// Region-local order: p0/p4 are the corners, p1-p3 the upper lip, p5-p7
/// the lower lip.
#[derive(Debug, Clone, Copy)]
pub struct MouthRegion<'a> {
    points: &'a [Point],
}

impl MouthRegion<'_> {
    /// Region-local point access, `i` in 0..8.
    pub fn p(&self, i: usize) -> Point {
        self.points[i]
    }
}
