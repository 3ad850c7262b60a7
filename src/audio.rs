//! Audible alert playback.
//!
//! Playback is delegated to an external player binary (`aplay` by default)
//! rather than decoded in-process; the monitor only hands over a file path.
//! The frame loop must never wait on audio, so [`AudioSink`] runs each
//! playback on a detached background task and only ever logs failures.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use thiserror::Error;

use crate::config::AudioConfig;
use crate::engine::types::{AlertEvent, AlertKind};
use crate::engine::AlertSink;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("alert sound asset not found: {path}")]
    MissingAsset { path: PathBuf },
    #[error("failed to start player '{player}': {source}")]
    Spawn {
        player: String,
        #[source]
        source: std::io::Error,
    },
    #[error("player '{player}' exited with {status}")]
    Exit {
        player: String,
        status: std::process::ExitStatus,
    },
}

/// Sound asset per alert kind.
#[derive(Debug, Clone)]
pub struct AlertAssets {
    sleep: PathBuf,
    drowsy: PathBuf,
    recovered: PathBuf,
}

impl AlertAssets {
    pub fn from_config(config: &AudioConfig) -> Self {
        Self {
            sleep: PathBuf::from(&config.sleep_sound),
            drowsy: PathBuf::from(&config.drowsy_sound),
            recovered: PathBuf::from(&config.active_sound),
        }
    }

    pub fn path_for(&self, kind: AlertKind) -> &Path {
        match kind {
            AlertKind::Sleeping => &self.sleep,
            AlertKind::Drowsy => &self.drowsy,
            AlertKind::Recovered => &self.recovered,
        }
    }

    /// Startup check: every asset that can actually be dispatched must
    /// exist. A missing file discovered mid-drive would make alerts
    /// silently inaudible. The recovered chime is only reachable when
    /// recovery alerts are enabled, so its file is optional otherwise.
    pub fn verify(&self, recovery_enabled: bool) -> Result<(), PlaybackError> {
        let mut required = vec![&self.sleep, &self.drowsy];
        if recovery_enabled {
            required.push(&self.recovered);
        }
        for path in required {
            if !path.is_file() {
                return Err(PlaybackError::MissingAsset { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// Blocking playback of one asset. Implementations are always invoked from
/// a background task, never from the frame loop.
pub trait SoundPlayer: Send + Sync + 'static {
    fn play(&self, asset: &Path) -> Result<(), PlaybackError>;
}

/// Plays an asset by running the configured external player to completion.
pub struct CommandPlayer {
    program: String,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SoundPlayer for CommandPlayer {
    fn play(&self, asset: &Path) -> Result<(), PlaybackError> {
        let status = Command::new(&self.program)
            .arg(asset)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| PlaybackError::Spawn {
                player: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PlaybackError::Exit {
                player: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Fire-and-forget audio dispatch.
///
/// `dispatch` returns immediately after spawning the playback task; the
/// task owns its copies of the path and event metadata, so it shares
/// nothing with the classifier. Its outcome is logged, never awaited.
pub struct AudioSink {
    assets: AlertAssets,
    player: Arc<dyn SoundPlayer>,
}

impl AudioSink {
    pub fn new(assets: AlertAssets, player: Arc<dyn SoundPlayer>) -> Self {
        Self { assets, player }
    }
}

impl AlertSink for AudioSink {
    fn dispatch(&self, event: &AlertEvent) {
        let path = self.assets.path_for(event.kind).to_path_buf();
        let player = self.player.clone();
        let kind = event.kind;
        let id = event.id;

        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || player.play(&path)).await;
            match result {
                Ok(Ok(())) => {
                    tracing::debug!(alert = kind.as_str(), %id, "Alert playback finished");
                }
                Ok(Err(e)) => {
                    // 播放失败只记录，绝不回传给帧循环
                    tracing::warn!(alert = kind.as_str(), %id, error = %e, "Alert playback failed");
                }
                Err(e) => {
                    tracing::error!(alert = kind.as_str(), %id, error = %e, "Alert playback task panicked");
                }
            }
        });
    }
}

/// Sink for audio-disabled runs; transitions still show up in the logs.
pub struct NullSink;

impl AlertSink for NullSink {
    fn dispatch(&self, event: &AlertEvent) {
        tracing::debug!(alert = event.kind.as_str(), "Audio disabled, alert not played");
    }
}
