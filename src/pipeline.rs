//! Per-frame orchestration.
//!
//! One [`FramePipeline`] instance is the whole per-face processing context:
//! ratio measurement, temporal classification and alert dispatch, plus run
//! statistics for the shutdown summary. The caller owns it and feeds it one
//! frame at a time; there is no shared or global state behind it.

use std::sync::Arc;

use crate::engine::ratios;
use crate::engine::{
    AlertDispatcher, AlertEvent, AlertSink, AlertnessState, CounterSnapshot, EngineConfig,
    FrameMetrics, TemporalClassifier,
};
use crate::landmarks::LandmarkSet;

/// Counters reported in the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames: u64,
    pub absent_frames: u64,
    pub transitions: u64,
    pub alerts: u64,
}

/// Everything one frame produced.
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    /// Displayed state after this frame, for the overlay collaborator.
    pub state: AlertnessState,
    /// `None` when no face was detected this frame.
    pub metrics: Option<FrameMetrics>,
    /// At most one alert, on the frame of a state transition.
    pub alert: Option<AlertEvent>,
}

pub struct FramePipeline {
    classifier: TemporalClassifier,
    dispatcher: AlertDispatcher,
    stats: PipelineStats,
}

impl FramePipeline {
    /// The config must have passed [`EngineConfig::validate`] at startup.
    pub fn new(config: EngineConfig, sink: Arc<dyn AlertSink>) -> Self {
        Self {
            classifier: TemporalClassifier::new(config.thresholds),
            dispatcher: AlertDispatcher::new(config.dispatch, sink),
            stats: PipelineStats::default(),
        }
    }

    /// Processes one frame. `None` means the detector found no face: the
    /// classifier is not consulted and all accumulated evidence persists
    /// untouched until the face returns.
    pub fn process(&mut self, landmarks: Option<&LandmarkSet>) -> FrameOutcome {
        self.stats.frames += 1;

        let Some(landmarks) = landmarks else {
            self.stats.absent_frames += 1;
            tracing::trace!(frame = self.stats.frames, "No face detected, state persists");
            return FrameOutcome {
                state: self.classifier.state(),
                metrics: None,
                alert: None,
            };
        };

        let metrics = ratios::measure(landmarks);
        let before = self.classifier.state();
        let state = self.classifier.observe(metrics);

        if state == before {
            tracing::trace!(
                frame = self.stats.frames,
                ear = metrics.ear,
                mar = metrics.mar,
                state = state.as_str(),
                "Frame processed"
            );
        } else {
            self.stats.transitions += 1;
            let counters = self.classifier.counters();
            tracing::info!(
                frame = self.stats.frames,
                from = before.as_str(),
                to = state.as_str(),
                ear = metrics.ear,
                mar = metrics.mar,
                sleep_frames = counters.sleep_frames,
                drowsy_eye_frames = counters.drowsy_eye_frames,
                yawn_frames = counters.yawn_frames,
                "Alertness state changed"
            );
        }

        let alert = self.dispatcher.observe(state);
        if let Some(event) = &alert {
            self.stats.alerts += 1;
            tracing::info!(alert = event.kind.as_str(), id = %event.id, "Alert dispatched");
        }

        FrameOutcome {
            state,
            metrics: Some(metrics),
            alert,
        }
    }

    pub fn state(&self) -> AlertnessState {
        self.classifier.state()
    }

    pub fn counters(&self) -> CounterSnapshot {
        self.classifier.counters()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }
}
