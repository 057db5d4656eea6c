//! Weather warning records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// MetService warning tier, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningLevel {
    /// Heads-up outlook.
    Advisory,
    /// Conditions may reach warning criteria.
    Watch,
    /// Orange warning: be prepared.
    OrangeWarning,
    /// Red warning: take action now.
    RedWarning,
}

impl WarningLevel {
    /// Map a free-text upstream level; unknown labels count as advisories.
    ///
    /// ```
    /// use alerts::domain::WarningLevel;
    ///
    /// assert_eq!(WarningLevel::from_label("Heavy Rain Warning - Red"), WarningLevel::RedWarning);
    /// assert_eq!(WarningLevel::from_label("Strong Wind Watch"), WarningLevel::Watch);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let lowered = label.to_ascii_lowercase();
        let has_word = |word: &str| {
            lowered
                .split(|ch: char| !ch.is_ascii_alphanumeric())
                .any(|part| part == word)
        };
        if has_word("red") {
            Self::RedWarning
        } else if has_word("orange") || has_word("warning") {
            Self::OrangeWarning
        } else if has_word("watch") {
            Self::Watch
        } else {
            Self::Advisory
        }
    }
}

/// One weather warning covering one or more regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlert {
    /// Upstream warning identifier.
    pub id: String,
    /// Warning tier.
    pub level: WarningLevel,
    /// Short headline.
    pub headline: String,
    /// Longer description, when published.
    #[serde(default)]
    pub description: String,
    /// Affected region names.
    pub regions: Vec<String>,
    /// Issue time.
    pub issued_at: DateTime<Utc>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}

impl WeatherAlert {
    /// Whether the warning has expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
