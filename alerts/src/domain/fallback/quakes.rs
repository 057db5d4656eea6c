//! Fallback earthquakes scattered around scope cities.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

use super::{FallbackGenerator, compass_point, offset, seeded_rng, slug};
use crate::domain::records::{QuakeAlert, QuakeSeverity};
use crate::domain::scope::{AlertScope, ScopedRecord};

const MAX_OFFSET_KM: f64 = 38.0;
const MIN_OFFSET_KM: f64 = 1.0;
/// Share of the quake radius a generated offset may use.
const RADIUS_MARGIN: f64 = 0.9;
const LOOKBACK_SECONDS: i64 = 24 * 60 * 60;

/// One to three quakes per scope city, within 40 km of it and inside the
/// scope's quake radius.
#[derive(Debug, Clone, Copy)]
pub struct QuakeFallback {
    seed: u64,
}

impl QuakeFallback {
    /// Generator seeded with `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl FallbackGenerator for QuakeFallback {
    type Record = QuakeAlert;

    fn generate(&self, scope: &AlertScope, now: DateTime<Utc>) -> Vec<QuakeAlert> {
        let mut rng = seeded_rng(self.seed);
        let max_offset_km = MAX_OFFSET_KM.min(scope.quake_radius_km() * RADIUS_MARGIN);
        let mut quakes = Vec::new();
        for city in scope.known_cities() {
            let count = rng.random_range(1..=3_usize);
            for index in 0..count {
                let distance_km = if max_offset_km > MIN_OFFSET_KM {
                    rng.random_range(MIN_OFFSET_KM..max_offset_km)
                } else {
                    max_offset_km.max(0.0)
                };
                let bearing: f64 = rng.random_range(0.0..360.0);
                let magnitude = (rng.random_range(2.5..=5.5_f64) * 10.0).round() / 10.0;
                let depth_km = (rng.random_range(5.0..40.0_f64) * 10.0).round() / 10.0;
                let age = TimeDelta::seconds(rng.random_range(0..LOOKBACK_SECONDS));
                let coordinate = offset(city.coordinate, distance_km, bearing);
                let quake = QuakeAlert {
                    id: format!("fallback-quake-{}-{index}", slug(city.name)),
                    magnitude,
                    depth_km,
                    mmi: None,
                    locality: format!(
                        "{} km {} of {}",
                        distance_km.round(),
                        compass_point(bearing),
                        city.name
                    ),
                    coordinate,
                    occurred_at: now - age,
                    severity: QuakeSeverity::classify(None, magnitude),
                    nearest_city: None,
                    distance_km: None,
                };
                quakes.extend(quake.scoped(scope));
            }
        }
        quakes.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        quakes
    }
}
