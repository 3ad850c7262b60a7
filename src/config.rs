use std::env;
use std::str::FromStr;

/// Process configuration, resolved once at startup from the environment
/// (with `.env` support via dotenvy in `main`).
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub engine: EngineEnvConfig,
    pub audio: AudioConfig,
    pub replay: ReplayConfig,
}

/// Raw engine overrides; bridged into `engine::EngineConfig::from_env` and
/// validated there.
#[derive(Debug, Clone)]
pub struct EngineEnvConfig {
    pub ear_active: f64,
    pub ear_drowsy: f64,
    pub mar_yawn: f64,
    pub sleep_frames: u32,
    pub drowsy_frames: u32,
    pub yawn_frames: u32,
    pub alert_on_recovery: bool,
}

#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub enabled: bool,
    /// External player binary; receives the asset path as its only argument.
    pub player: String,
    pub sleep_sound: String,
    pub drowsy_sound: String,
    pub active_sound: String,
}

#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// JSONL landmark stream path; `-` reads stdin.
    pub input: String,
    /// Frames per second for paced replay; 0 replays as fast as possible.
    pub fps: f64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            engine: EngineEnvConfig {
                ear_active: env_or_parse("EAR_ACTIVE", 0.28_f64),
                ear_drowsy: env_or_parse("EAR_DROWSY", 0.22_f64),
                mar_yawn: env_or_parse("MAR_YAWN", 0.70_f64),
                sleep_frames: env_or_parse("SLEEP_FRAMES", 35_u32),
                drowsy_frames: env_or_parse("DROWSY_FRAMES", 20_u32),
                yawn_frames: env_or_parse("YAWN_FRAMES", 15_u32),
                alert_on_recovery: env_or_bool("ALERT_ON_RECOVERY", false),
            },
            audio: AudioConfig {
                enabled: env_or_bool("AUDIO_ENABLED", false),
                player: env_or("AUDIO_PLAYER", "aplay"),
                sleep_sound: env_or("SLEEP_SOUND", "./assets/sleep.wav"),
                drowsy_sound: env_or("DROWSY_SOUND", "./assets/drowsy.wav"),
                active_sound: env_or("ACTIVE_SOUND", "./assets/active.wav"),
            },
            replay: ReplayConfig {
                input: env_or("REPLAY_INPUT", "-"),
                fps: env_or_parse("REPLAY_FPS", 0.0_f64),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn managed_keys() -> &'static [&'static str] {
        &[
            "RUST_LOG",
            "EAR_ACTIVE",
            "EAR_DROWSY",
            "SLEEP_FRAMES",
            "ALERT_ON_RECOVERY",
            "AUDIO_ENABLED",
            "AUDIO_PLAYER",
            "REPLAY_INPUT",
            "REPLAY_FPS",
        ]
    }

    fn clear_keys(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_when_missing() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        let cfg = Config::from_env();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.engine.sleep_frames, 35);
        assert!((cfg.engine.ear_active - 0.28).abs() < 1e-12);
        assert!(!cfg.audio.enabled);
        assert_eq!(cfg.audio.player, "aplay");
        assert_eq!(cfg.replay.input, "-");
    }

    #[test]
    fn parses_numeric_overrides() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("EAR_ACTIVE", "0.31");
        env::set_var("SLEEP_FRAMES", "50");
        env::set_var("REPLAY_FPS", "30");

        let cfg = Config::from_env();
        assert!((cfg.engine.ear_active - 0.31).abs() < 1e-12);
        assert_eq!(cfg.engine.sleep_frames, 50);
        assert!((cfg.replay.fps - 30.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_values_fall_back() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("SLEEP_FRAMES", "many");
        env::set_var("EAR_DROWSY", "x");

        let cfg = Config::from_env();
        assert_eq!(cfg.engine.sleep_frames, 35);
        assert!((cfg.engine.ear_drowsy - 0.22).abs() < 1e-12);
    }

    #[test]
    fn boolean_flags_accept_common_spellings() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("AUDIO_ENABLED", "YES");
        env::set_var("ALERT_ON_RECOVERY", "on");

        let cfg = Config::from_env();
        assert!(cfg.audio.enabled);
        assert!(cfg.engine.alert_on_recovery);
    }
}
