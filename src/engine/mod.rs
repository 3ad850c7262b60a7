//! Alertness classification engine.
//!
//! Per-frame data flow: ratio calculation ([`ratios`]) feeds the temporal
//! state machine ([`classifier`]), whose output drives edge-triggered alert
//! dispatch ([`dispatcher`]). All three stages are synchronous and
//! allocation-free on the hot path.

pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod ratios;
pub mod types;

pub use classifier::TemporalClassifier;
pub use config::EngineConfig;
pub use dispatcher::{AlertDispatcher, AlertSink};
pub use types::{AlertEvent, AlertKind, AlertnessState, CounterSnapshot, FrameMetrics};
