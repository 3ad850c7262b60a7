use serde::{Deserialize, Serialize};

/// Ratio and hysteresis thresholds driving the temporal classifier.
///
/// Defaults match the tuned values for 30 fps input; all of them can be
/// overridden through the environment without recompiling (see
/// `crate::config`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    /// EAR at or above this means fully open eyes.
    pub ear_active: f64,
    /// EAR below this means closed eyes (sleep evidence).
    pub ear_drowsy: f64,
    /// MAR strictly above this counts as a yawn frame.
    pub mar_yawn: f64,
    /// Consecutive closed-eye frames before Sleeping.
    pub sleep_frames: u32,
    /// Consecutive half-closed frames before Drowsy.
    pub drowsy_frames: u32,
    /// Consecutive yawn frames before Drowsy.
    pub yawn_frames: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            ear_active: 0.28,
            ear_drowsy: 0.22,
            mar_yawn: 0.70,
            sleep_frames: 35,
            drowsy_frames: 20,
            yawn_frames: 15,
        }
    }
}

/// Alert dispatch behavior.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchConfig {
    /// Also chime when the driver returns to Active. Off by default:
    /// recovery is silent, only degradations alert.
    pub alert_on_recovery: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl EngineConfig {
    pub fn from_env(env_config: &crate::config::EngineEnvConfig) -> Self {
        Self {
            thresholds: ThresholdConfig {
                ear_active: env_config.ear_active,
                ear_drowsy: env_config.ear_drowsy,
                mar_yawn: env_config.mar_yawn,
                sleep_frames: env_config.sleep_frames,
                drowsy_frames: env_config.drowsy_frames,
                yawn_frames: env_config.yawn_frames,
            },
            dispatch: DispatchConfig {
                alert_on_recovery: env_config.alert_on_recovery,
            },
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let t = &self.thresholds;

        if !(0.0..=1.0).contains(&t.ear_drowsy) || t.ear_drowsy <= 0.0 {
            return Err("thresholds.ear_drowsy must be in (0,1]".to_string());
        }
        if !(0.0..=1.0).contains(&t.ear_active) || t.ear_active <= 0.0 {
            return Err("thresholds.ear_active must be in (0,1]".to_string());
        }
        // 两个 EAR 阈值之间必须留出 drowsy 区间，否则分支2不可达
        if t.ear_active <= t.ear_drowsy {
            return Err(format!(
                "thresholds.ear_active ({}) must be > thresholds.ear_drowsy ({})",
                t.ear_active, t.ear_drowsy
            ));
        }
        if !t.mar_yawn.is_finite() || t.mar_yawn <= 0.0 {
            return Err("thresholds.mar_yawn must be a positive number".to_string());
        }
        if t.sleep_frames == 0 || t.drowsy_frames == 0 || t.yawn_frames == 0 {
            return Err("frame thresholds must be >= 1".to_string());
        }

        Ok(())
    }
}
