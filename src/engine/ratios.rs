//! Aspect-ratio calculation.
//!
//! Stateless geometry over one frame's landmark regions:
//! - EAR = (|p1-p5| + |p2-p4|) / (2 * |p0-p3|)，p0/p3 为眼角水平轴
//! - MAR = (|p2-p6| + |p3-p5|) / (2 * |p0-p4|)，p0/p4 为嘴角水平轴
//!
//! A collapsed horizontal axis (degenerate detection) yields the sentinel
//! value 0.0 rather than a numeric fault; 0.0 reads as fully closed, which
//! is the conservative interpretation.

use crate::landmarks::{EyeRegion, LandmarkSet, MouthRegion};

use super::types::FrameMetrics;

/// Denominators below this are treated as degenerate geometry.
const DEGENERATE_AXIS: f64 = 1e-6;

/// Eye aspect ratio for a single eye.
pub fn eye_aspect_ratio(eye: &EyeRegion<'_>) -> f64 {
    let horizontal = eye.p(0).distance(&eye.p(3));
    if horizontal < DEGENERATE_AXIS {
        return 0.0;
    }

    let vertical1 = eye.p(1).distance(&eye.p(5));
    let vertical2 = eye.p(2).distance(&eye.p(4));
    (vertical1 + vertical2) / (2.0 * horizontal)
}

/// Mouth aspect ratio over the eight inner-mouth points.
pub fn mouth_aspect_ratio(mouth: &MouthRegion<'_>) -> f64 {
    let horizontal = mouth.p(0).distance(&mouth.p(4));
    if horizontal < DEGENERATE_AXIS {
        return 0.0;
    }

    let vertical1 = mouth.p(2).distance(&mouth.p(6));
    let vertical2 = mouth.p(3).distance(&mouth.p(5));
    (vertical1 + vertical2) / (2.0 * horizontal)
}

/// Measures one frame: binocular mean EAR plus MAR.
pub fn measure(landmarks: &LandmarkSet) -> FrameMetrics {
    let left = eye_aspect_ratio(&landmarks.left_eye());
    let right = eye_aspect_ratio(&landmarks.right_eye());
    let mar = mouth_aspect_ratio(&landmarks.mouth());

    FrameMetrics::new((left + right) / 2.0, mar)
}
