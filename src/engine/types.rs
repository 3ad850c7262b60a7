use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discrete driver alertness level.
///
/// This is the single externally visible classification. Drowsy is reachable
/// through two evidence paths (sustained low EAR or sustained yawning) but
/// downstream consumers never see which path fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertnessState {
    #[default]
    Active,
    Drowsy,
    Sleeping,
}

impl AlertnessState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Drowsy => "drowsy",
            Self::Sleeping => "sleeping",
        }
    }

    /// Overlay label the render collaborator shows for this state.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active :)",
            Self::Drowsy => "Drowsy !",
            Self::Sleeping => "SLEEPING !!!",
        }
    }
}

/// Geometric ratios measured from one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMetrics {
    /// Eye aspect ratio, mean of both eyes. Drops as the eyes close.
    pub ear: f64,
    /// Mouth aspect ratio. Rises while yawning.
    pub mar: f64,
}

impl FrameMetrics {
    pub fn new(ear: f64, mar: f64) -> Self {
        Self { ear, mar }
    }
}

/// Point-in-time copy of the classifier's hysteresis counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    pub sleep_frames: u32,
    pub drowsy_eye_frames: u32,
    pub yawn_frames: u32,
}

/// Which named alert sound a dispatch refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Drowsy,
    Sleeping,
    Recovered,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drowsy => "drowsy",
            Self::Sleeping => "sleeping",
            Self::Recovered => "recovered",
        }
    }
}

/// One edge-triggered alert, produced at most once per state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub id: Uuid,
    pub kind: AlertKind,
    pub at: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(kind: AlertKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            at: Utc::now(),
        }
    }
}
