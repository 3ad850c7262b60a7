//! Edge-triggered alert dispatch.
//!
//! The classifier reports a state every frame; alerts must fire only on the
//! frame a transition happens, never again while the state persists.

use std::sync::Arc;

use super::config::DispatchConfig;
use super::types::{AlertEvent, AlertKind, AlertnessState};

/// Receives alert events. Implementations must not block the caller: the
/// audio sink hands the work to a detached task, test sinks just record.
pub trait AlertSink: Send + Sync {
    fn dispatch(&self, event: &AlertEvent);
}

/// Compares each frame's state against the previous one and fires the sink
/// exactly once per transition.
pub struct AlertDispatcher {
    sink: Arc<dyn AlertSink>,
    previous: AlertnessState,
    alert_on_recovery: bool,
}

impl AlertDispatcher {
    /// `previous` starts at Active: startup is the baseline, so the first
    /// observed frame can only fire if the driver has actually left Active.
    pub fn new(config: DispatchConfig, sink: Arc<dyn AlertSink>) -> Self {
        Self {
            sink,
            previous: AlertnessState::Active,
            alert_on_recovery: config.alert_on_recovery,
        }
    }

    /// Feeds the frame's classified state; returns the event if one fired.
    ///
    /// `previous` is updated on every transition, including silent
    /// recoveries, so a later re-entry into Drowsy/Sleeping fires again.
    pub fn observe(&mut self, state: AlertnessState) -> Option<AlertEvent> {
        if state == self.previous {
            return None;
        }
        self.previous = state;

        let kind = match state {
            AlertnessState::Sleeping => AlertKind::Sleeping,
            AlertnessState::Drowsy => AlertKind::Drowsy,
            AlertnessState::Active => {
                if !self.alert_on_recovery {
                    return None;
                }
                AlertKind::Recovered
            }
        };

        let event = AlertEvent::new(kind);
        self.sink.dispatch(&event);
        Some(event)
    }

    pub fn previous_state(&self) -> AlertnessState {
        self.previous
    }
}
