//! Fallback weather warnings, one per scope region.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use super::{FallbackGenerator, seeded_rng, slug};
use crate::domain::records::{WarningLevel, WeatherAlert};
use crate::domain::scope::AlertScope;

const PHENOMENA: [(&str, &str); 4] = [
    ("Heavy Rain", "Periods of heavy rain may cause surface flooding"),
    ("Strong Wind", "Severe gales may damage trees and powerlines"),
    ("Snow", "Snow may settle to low levels and affect travel"),
    ("Thunderstorm", "Thunderstorms may bring localised downpours and hail"),
];

const LEVELS: [WarningLevel; 3] = [
    WarningLevel::Advisory,
    WarningLevel::Watch,
    WarningLevel::OrangeWarning,
];

/// One warning per region that owns a scope city.
#[derive(Debug, Clone, Copy)]
pub struct WeatherFallback {
    seed: u64,
}

impl WeatherFallback {
    /// Generator seeded with `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl FallbackGenerator for WeatherFallback {
    type Record = WeatherAlert;

    fn generate(&self, scope: &AlertScope, now: DateTime<Utc>) -> Vec<WeatherAlert> {
        let mut rng = seeded_rng(self.seed);
        scope
            .regions()
            .iter()
            .map(|region| {
                let (phenomenon, description) = PHENOMENA
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(("Heavy Rain", "Heavy rain expected"));
                let level = LEVELS.choose(&mut rng).copied().unwrap_or(WarningLevel::Advisory);
                let issued_at = now - TimeDelta::minutes(rng.random_range(0..360));
                let expires_at = issued_at + TimeDelta::hours(rng.random_range(12..36));
                WeatherAlert {
                    id: format!("fallback-weather-{}", slug(region)),
                    level,
                    headline: format!("{phenomenon} {} for {region}", level_label(level)),
                    description: description.to_owned(),
                    regions: vec![(*region).to_owned()],
                    issued_at,
                    expires_at,
                }
            })
            .collect()
    }
}

const fn level_label(level: WarningLevel) -> &'static str {
    match level {
        WarningLevel::Advisory => "Advisory",
        WarningLevel::Watch => "Watch",
        WarningLevel::OrangeWarning => "Warning - Orange",
        WarningLevel::RedWarning => "Warning - Red",
    }
}
