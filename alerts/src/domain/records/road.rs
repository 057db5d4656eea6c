//! Road event records.

use chrono::{DateTime, Utc};
use nz_regions::Coordinate;
use serde::{Deserialize, Serialize};

/// Kind of road event reported by the transport agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadEventKind {
    /// Road closed to traffic.
    Closure,
    /// Planned maintenance or construction.
    Roadworks,
    /// Vehicle crash.
    Crash,
    /// Slips, debris, flooding, ice.
    Hazard,
    /// Congestion or stop/go traffic management.
    Delay,
}

impl RoadEventKind {
    /// Map a free-text upstream event type onto a kind.
    ///
    /// ```
    /// use alerts::domain::RoadEventKind;
    ///
    /// assert_eq!(RoadEventKind::from_label("Road Closure"), RoadEventKind::Closure);
    /// assert_eq!(RoadEventKind::from_label("Slip"), RoadEventKind::Hazard);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let lowered = label.to_ascii_lowercase();
        if lowered.contains("clos") {
            Self::Closure
        } else if lowered.contains("work") || lowered.contains("maint") {
            Self::Roadworks
        } else if lowered.contains("crash") || lowered.contains("accident") {
            Self::Crash
        } else if lowered.contains("delay") || lowered.contains("congest") {
            Self::Delay
        } else {
            Self::Hazard
        }
    }
}

/// Lifecycle state of a road event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadStatus {
    /// In effect now.
    Active,
    /// Scheduled for later.
    Planned,
    /// Cleared.
    Resolved,
}

impl RoadStatus {
    /// Map a free-text upstream status; unknown labels count as active.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let lowered = label.to_ascii_lowercase();
        if lowered.contains("resolv") || lowered.contains("clear") {
            Self::Resolved
        } else if lowered.contains("plan") || lowered.contains("future") {
            Self::Planned
        } else {
            Self::Active
        }
    }
}

/// One road event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadAlert {
    /// Upstream event identifier.
    pub id: String,
    /// Event kind.
    pub kind: RoadEventKind,
    /// Lifecycle state.
    pub status: RoadStatus,
    /// Human-readable description.
    pub description: String,
    /// Affected road, e.g. `"SH1"`.
    pub road: String,
    /// City the event is attributed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Region the event is attributed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Event location.
    pub coordinate: Coordinate,
    /// Start of the event.
    pub starts_at: DateTime<Utc>,
    /// Expected end, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}
