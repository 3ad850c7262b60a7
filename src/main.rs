use std::sync::Arc;
use std::time::Duration;

use alertness_monitor::audio::{AlertAssets, AudioSink, CommandPlayer, NullSink};
use alertness_monitor::config::Config;
use alertness_monitor::engine::{AlertSink, EngineConfig};
use alertness_monitor::logging::{init_tracing, LogConfig};
use alertness_monitor::pipeline::FramePipeline;
use alertness_monitor::source::{JsonlSource, SourceError};
use tokio::io::AsyncBufRead;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    init_tracing(&LogConfig {
        log_level: config.log_level.clone(),
        enable_file_logs: config.enable_file_logs,
        log_dir: config.log_dir.clone(),
    });
    tracing::info!("Starting alertness-monitor");

    let engine_config = EngineConfig::from_env(&config.engine);
    if let Err(e) = engine_config.validate() {
        panic!(
            "FATAL: Invalid threshold configuration: {e}. \
             Fix the EAR_ACTIVE/EAR_DROWSY/MAR_YAWN or *_FRAMES environment variables."
        );
    }

    let sink: Arc<dyn AlertSink> = if config.audio.enabled {
        let assets = AlertAssets::from_config(&config.audio);
        // 资源缺失必须在启动时暴露，而不是第一次报警时
        assets
            .verify(engine_config.dispatch.alert_on_recovery)
            .expect("Alert sound asset check failed");
        let player = Arc::new(CommandPlayer::new(config.audio.player.clone()));
        tracing::info!(player = %config.audio.player, "Audio alerts enabled");
        Arc::new(AudioSink::new(assets, player))
    } else {
        tracing::info!("Audio disabled, alerts will only be logged");
        Arc::new(NullSink)
    };

    let mut pipeline = FramePipeline::new(engine_config, sink);

    let outcome = if config.replay.input == "-" {
        tracing::info!("Reading landmark frames from stdin");
        let mut source = JsonlSource::stdin();
        run_loop(&mut source, &mut pipeline, config.replay.fps).await
    } else {
        tracing::info!(path = %config.replay.input, "Reading landmark frames");
        let mut source = JsonlSource::open(&config.replay.input)
            .await
            .expect("Failed to open landmark input");
        run_loop(&mut source, &mut pipeline, config.replay.fps).await
    };

    if let Err(e) = outcome {
        tracing::error!(error = %e, "Landmark stream failed");
    }

    let stats = pipeline.stats();
    tracing::info!(
        frames = stats.frames,
        absent_frames = stats.absent_frames,
        transitions = stats.transitions,
        alerts = stats.alerts,
        state = pipeline.state().as_str(),
        "Shutdown complete"
    );
}

/// Drives the pipeline until the stream ends, an error surfaces, or a
/// shutdown signal arrives. One frame is fully processed before the next
/// read; alert playback runs on detached tasks and never blocks this loop.
async fn run_loop<R: AsyncBufRead + Unpin>(
    source: &mut JsonlSource<R>,
    pipeline: &mut FramePipeline,
    fps: f64,
) -> Result<(), SourceError> {
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut ticker = match replay_period(fps) {
        Some(period) => Some(tokio::time::interval(period)),
        None => {
            if fps != 0.0 {
                tracing::warn!(fps, "Unusable REPLAY_FPS, replaying unpaced");
            }
            None
        }
    };

    loop {
        let frame = tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                return Ok(());
            }
            frame = source.next_frame() => frame?,
        };

        let Some(frame) = frame else {
            tracing::info!("Landmark stream ended");
            return Ok(());
        };

        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }

        pipeline.process(frame.landmarks.as_ref());
    }
}

/// Pacing period for the replay loop, `None` when unpaced.
///
/// Rates that are non-positive, non-finite, or whose period cannot be
/// represented as a non-zero `Duration` disable pacing; `interval`
/// panics on a zero period, so those never reach it.
fn replay_period(fps: f64) -> Option<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / fps)
        .ok()
        .filter(|period| !period.is_zero())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_period_matches_the_requested_rate() {
        let period = replay_period(30.0).expect("paced");
        assert!((period.as_secs_f64() - 1.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn unusable_rates_disable_pacing() {
        assert!(replay_period(0.0).is_none());
        assert!(replay_period(-5.0).is_none());
        assert!(replay_period(f64::NAN).is_none());
        assert!(replay_period(f64::INFINITY).is_none());
        // 周期超出 Duration 范围或向下取整为零都不能 panic
        assert!(replay_period(1e-30).is_none());
        assert!(replay_period(f64::MAX).is_none());
    }
}
