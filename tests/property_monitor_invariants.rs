mod common;

use std::sync::Arc;

use proptest::prelude::*;

use alertness_monitor::engine::config::{DispatchConfig, ThresholdConfig};
use alertness_monitor::engine::ratios;
use alertness_monitor::engine::types::FrameMetrics;
use alertness_monitor::engine::{AlertDispatcher, AlertnessState, TemporalClassifier};
use alertness_monitor::landmarks::LandmarkSet;

use common::fixtures::{face, RecordingSink};

fn metric_seq(max_len: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0_f64..0.6, 0.0_f64..1.2), 0..max_len)
}

proptest! {
    /// 任意观测序列后，最多只有一个迟滞计数器非零。
    #[test]
    fn pt_at_most_one_counter_nonzero(frames in metric_seq(150)) {
        let mut classifier = TemporalClassifier::new(ThresholdConfig::default());
        for (ear, mar) in frames {
            classifier.observe(FrameMetrics::new(ear, mar));
            let c = classifier.counters();
            let nonzero = [c.sleep_frames, c.drowsy_eye_frames, c.yawn_frames]
                .iter()
                .filter(|&&v| v > 0)
                .count();
            prop_assert!(nonzero <= 1, "counters = {c:?}");
        }
    }

    /// 一帧完全清醒的观测抹掉全部累积并立即回到 Active。
    #[test]
    fn pt_alert_frame_clears_everything(frames in metric_seq(150)) {
        let mut classifier = TemporalClassifier::new(ThresholdConfig::default());
        for (ear, mar) in frames {
            classifier.observe(FrameMetrics::new(ear, mar));
        }

        let state = classifier.observe(FrameMetrics::new(0.30, 0.30));
        prop_assert_eq!(state, AlertnessState::Active);
        let c = classifier.counters();
        prop_assert_eq!(c.sleep_frames, 0);
        prop_assert_eq!(c.drowsy_eye_frames, 0);
        prop_assert_eq!(c.yawn_frames, 0);
    }

    /// 比最小帧阈值(15)更短的序列不可能离开 Active。
    #[test]
    fn pt_short_sequences_stay_active(frames in metric_seq(15)) {
        let mut classifier = TemporalClassifier::new(ThresholdConfig::default());
        for (ear, mar) in frames {
            let state = classifier.observe(FrameMetrics::new(ear, mar));
            prop_assert_eq!(state, AlertnessState::Active);
        }
    }

    /// 报警次数恒等于进入 Drowsy/Sleeping 的转换次数（默认恢复静默）。
    #[test]
    fn pt_alert_count_matches_degrading_transitions(frames in metric_seq(200)) {
        let sink = Arc::new(RecordingSink::default());
        let mut classifier = TemporalClassifier::new(ThresholdConfig::default());
        let mut dispatcher = AlertDispatcher::new(
            DispatchConfig { alert_on_recovery: false },
            sink.clone(),
        );

        let mut previous = AlertnessState::Active;
        let mut degrading_transitions = 0_usize;
        for (ear, mar) in frames {
            let state = classifier.observe(FrameMetrics::new(ear, mar));
            if state != previous && state != AlertnessState::Active {
                degrading_transitions += 1;
            }
            previous = state;
            dispatcher.observe(state);
        }

        prop_assert_eq!(sink.kinds().len(), degrading_transitions);
    }

    /// 合成人脸的测量值与请求的比率一致（几何构造 ⇄ 公式往返）。
    #[test]
    fn pt_synthetic_face_measures_back(ear in 0.0_f64..0.6, mar in 0.0_f64..1.2) {
        let set = face(ear, mar);
        let metrics = ratios::measure(&set);
        prop_assert!((metrics.ear - ear).abs() < 1e-9);
        prop_assert!((metrics.mar - mar).abs() < 1e-9);
    }

    /// 任意有限几何的测量结果有限且非负。
    #[test]
    fn pt_ratios_are_finite_and_non_negative(
        coords in prop::collection::vec(prop::array::uniform2(-1000.0_f64..1000.0), 68)
    ) {
        let set = LandmarkSet::from_coords(coords).expect("finite coords are valid");
        let metrics = ratios::measure(&set);
        prop_assert!(metrics.ear.is_finite() && metrics.ear >= 0.0);
        prop_assert!(metrics.mar.is_finite() && metrics.mar >= 0.0);
    }
}
