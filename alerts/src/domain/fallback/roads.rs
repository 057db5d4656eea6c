//! Fallback road events, one per scope city.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use super::{FallbackGenerator, seeded_rng, slug};
use crate::domain::records::{RoadAlert, RoadEventKind, RoadStatus};
use crate::domain::scope::AlertScope;

const EVENTS: [(RoadEventKind, &str); 4] = [
    (RoadEventKind::Roadworks, "Lane closures for resurfacing, expect delays"),
    (RoadEventKind::Hazard, "Debris on the road, drive with care"),
    (RoadEventKind::Crash, "Crash blocking one lane, follow directions of emergency services"),
    (RoadEventKind::Delay, "Stop/go traffic management in place"),
];

const ROADS: [&str; 5] = ["SH1", "SH2", "SH3", "SH6", "Local road"];

/// One active road event per scope city, placed on the city itself.
#[derive(Debug, Clone, Copy)]
pub struct RoadFallback {
    seed: u64,
}

impl RoadFallback {
    /// Generator seeded with `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl FallbackGenerator for RoadFallback {
    type Record = RoadAlert;

    fn generate(&self, scope: &AlertScope, now: DateTime<Utc>) -> Vec<RoadAlert> {
        let mut rng = seeded_rng(self.seed);
        let catalog = scope.catalog();
        let mut roads: Vec<RoadAlert> = scope
            .known_cities()
            .map(|city| {
                let (kind, description) = EVENTS
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or((RoadEventKind::Hazard, "Take care"));
                let road = ROADS.choose(&mut rng).copied().unwrap_or("Local road");
                let starts_at = now - TimeDelta::minutes(rng.random_range(5..360));
                let ends_at = rng
                    .random_ratio(1, 2)
                    .then(|| now + TimeDelta::hours(rng.random_range(1..12)));
                RoadAlert {
                    id: format!("fallback-road-{}", slug(city.name)),
                    kind,
                    status: RoadStatus::Active,
                    description: format!("{description} near {}", city.name),
                    road: road.to_owned(),
                    city: Some(city.name.to_owned()),
                    region: catalog.region_of(city.name).map(|region| region.name.to_owned()),
                    coordinate: city.coordinate,
                    starts_at,
                    ends_at,
                }
            })
            .collect();
        roads.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));
        roads
    }
}
