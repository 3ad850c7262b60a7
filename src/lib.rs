//! Real-time driver alertness monitoring.
//!
//! Classifies a driver's state (active / drowsy / sleeping) from per-frame
//! facial landmarks and raises an audible alert once per state transition.
//!
//! ## 模块
//! - `landmarks`: 68 点关键点模型与校验
//! - `engine`: 纵横比计算、时序状态机、报警边沿触发
//! - `pipeline`: 按帧编排与运行统计
//! - `source`: JSONL 关键点回放输入
//! - `audio`: 外部播放器的后台报警音
//! - `config` / `logging`: 环境配置与日志初始化

pub mod audio;
pub mod config;
pub mod engine;
pub mod landmarks;
pub mod logging;
pub mod pipeline;
pub mod source;

pub use engine::{
    AlertDispatcher, AlertEvent, AlertKind, AlertSink, AlertnessState, CounterSnapshot,
    EngineConfig, FrameMetrics, TemporalClassifier,
};
pub use landmarks::{LandmarkError, LandmarkSet, Point};
pub use pipeline::{FrameOutcome, FramePipeline, PipelineStats};
pub use source::{FrameInput, JsonlSource, SourceError};
