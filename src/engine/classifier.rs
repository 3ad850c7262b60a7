//! Temporal alertness state machine.
//!
//! Instantaneous ratios are noisy (blinks, speech), so no single frame may
//! change the displayed state. Each condition must hold for a configured
//! number of consecutive frames before its transition is honored; one
//! non-qualifying frame resets the accumulation.

use super::config::ThresholdConfig;
use super::types::{AlertnessState, CounterSnapshot, FrameMetrics};

/// Hysteresis classifier, one instance per monitored face.
///
/// Owned by the caller and fed exactly once per frame in which a face was
/// detected. Frames without a face must simply not call [`observe`]: the
/// state and counters then persist unchanged.
///
/// [`observe`]: TemporalClassifier::observe
#[derive(Debug, Clone)]
pub struct TemporalClassifier {
    thresholds: ThresholdConfig,
    state: AlertnessState,
    sleep_frames: u32,
    drowsy_eye_frames: u32,
    yawn_frames: u32,
}

impl TemporalClassifier {
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self {
            thresholds,
            state: AlertnessState::Active,
            sleep_frames: 0,
            drowsy_eye_frames: 0,
            yawn_frames: 0,
        }
    }

    /// Feeds one frame's metrics and returns the (possibly unchanged)
    /// displayed state.
    ///
    /// Branches are evaluated in strict priority order; the first match
    /// wins and resets the other two counters, so at most one counter is
    /// ever non-zero. Below its threshold a branch leaves the displayed
    /// state as-is (sticky display); only the fully-alert branch forces
    /// Active immediately.
    pub fn observe(&mut self, metrics: FrameMetrics) -> AlertnessState {
        let t = &self.thresholds;

        if metrics.ear < t.ear_drowsy {
            // 闭眼证据优先于一切，包括同帧的哈欠证据
            self.sleep_frames = self.sleep_frames.saturating_add(1);
            self.drowsy_eye_frames = 0;
            self.yawn_frames = 0;
            if self.sleep_frames >= t.sleep_frames {
                self.state = AlertnessState::Sleeping;
            }
        } else if metrics.ear < t.ear_active {
            self.drowsy_eye_frames = self.drowsy_eye_frames.saturating_add(1);
            self.sleep_frames = 0;
            self.yawn_frames = 0;
            if self.drowsy_eye_frames >= t.drowsy_frames {
                self.state = AlertnessState::Drowsy;
            }
        } else if metrics.mar > t.mar_yawn {
            self.yawn_frames = self.yawn_frames.saturating_add(1);
            self.sleep_frames = 0;
            self.drowsy_eye_frames = 0;
            if self.yawn_frames >= t.yawn_frames {
                self.state = AlertnessState::Drowsy;
            }
        } else {
            self.sleep_frames = 0;
            self.drowsy_eye_frames = 0;
            self.yawn_frames = 0;
            self.state = AlertnessState::Active;
        }

        self.state
    }

    pub fn state(&self) -> AlertnessState {
        self.state
    }

    pub fn counters(&self) -> CounterSnapshot {
        CounterSnapshot {
            sleep_frames: self.sleep_frames,
            drowsy_eye_frames: self.drowsy_eye_frames,
            yawn_frames: self.yawn_frames,
        }
    }

    /// Drops all accumulated evidence and returns to Active.
    pub fn reset(&mut self) {
        self.state = AlertnessState::Active;
        self.sleep_frames = 0;
        self.drowsy_eye_frames = 0;
        self.yawn_frames = 0;
    }
}
