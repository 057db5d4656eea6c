//! Earthquake records.

use chrono::{DateTime, Utc};
use nz_regions::Coordinate;
use serde::{Deserialize, Serialize};

/// Felt-intensity bucket derived from MMI, or magnitude when MMI is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuakeSeverity {
    /// MMI 3 or below.
    Weak,
    /// MMI 4.
    Light,
    /// MMI 5.
    Moderate,
    /// MMI 6.
    Strong,
    /// MMI 7 and above.
    Severe,
}

impl QuakeSeverity {
    /// Classify using MMI when it is known (non-negative), else magnitude.
    ///
    /// ```
    /// use alerts::domain::QuakeSeverity;
    ///
    /// assert_eq!(QuakeSeverity::classify(Some(5), 3.1), QuakeSeverity::Moderate);
    /// assert_eq!(QuakeSeverity::classify(None, 6.2), QuakeSeverity::Severe);
    /// ```
    #[must_use]
    pub fn classify(mmi: Option<i8>, magnitude: f64) -> Self {
        match mmi.filter(|value| *value >= 0) {
            Some(value) => match value {
                ..=3 => Self::Weak,
                4 => Self::Light,
                5 => Self::Moderate,
                6 => Self::Strong,
                _ => Self::Severe,
            },
            None if magnitude < 3.0 => Self::Weak,
            None if magnitude < 4.0 => Self::Light,
            None if magnitude < 5.0 => Self::Moderate,
            None if magnitude < 6.0 => Self::Strong,
            None => Self::Severe,
        }
    }
}

/// One earthquake report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuakeAlert {
    /// Upstream public identifier.
    pub id: String,
    /// Summary magnitude.
    pub magnitude: f64,
    /// Hypocentre depth in kilometres.
    pub depth_km: f64,
    /// Modified Mercalli intensity when calculated upstream.
    pub mmi: Option<i8>,
    /// Upstream locality description.
    pub locality: String,
    /// Epicentre.
    pub coordinate: Coordinate,
    /// Origin time.
    pub occurred_at: DateTime<Utc>,
    /// Derived severity bucket.
    pub severity: QuakeSeverity,
    /// Subscribed city nearest the epicentre, set during aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_city: Option<String>,
    /// Distance to `nearest_city` in kilometres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}
