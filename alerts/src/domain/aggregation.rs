//! Fan-out over every hazard feed for a set of subscriptions.

use nz_regions::RegionCatalog;
use serde::Serialize;
use tracing::{debug, warn};

use super::cancellation::CancelToken;
use super::feed::{FetchCancelled, HazardFeed};
use super::hazard::HazardKind;
use super::records::{CommunityReport, QuakeAlert, RoadAlert, WeatherAlert};
use super::report_service::CommunityReportService;
use super::scope::AlertScope;
use super::sourced::Sourced;
use super::subscription::Subscription;

/// Everything relevant to one set of subscriptions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDigest {
    /// Earthquakes near subscribed cities, newest first.
    pub quakes: Sourced<Vec<QuakeAlert>>,
    /// Road events in subscribed cities or regions, newest first.
    pub roads: Sourced<Vec<RoadAlert>>,
    /// Weather warnings covering subscribed regions.
    pub weather: Sourced<Vec<WeatherAlert>>,
    /// Local community reports for subscribed cities, newest first.
    pub community: Vec<CommunityReport>,
}

/// Combines the three hazard feeds and local community reports.
pub struct AlertAggregator {
    catalog: RegionCatalog,
    quakes: HazardFeed<QuakeAlert>,
    roads: HazardFeed<RoadAlert>,
    weather: HazardFeed<WeatherAlert>,
    reports: CommunityReportService,
    quake_radius_km: f64,
}

impl AlertAggregator {
    /// Assemble the aggregator from its feeds.
    pub fn new(
        catalog: RegionCatalog,
        quakes: HazardFeed<QuakeAlert>,
        roads: HazardFeed<RoadAlert>,
        weather: HazardFeed<WeatherAlert>,
        reports: CommunityReportService,
        quake_radius_km: f64,
    ) -> Self {
        Self {
            catalog,
            quakes,
            roads,
            weather,
            reports,
            quake_radius_km,
        }
    }

    /// Scope of cities whose subscriptions enable `kind`.
    #[must_use]
    pub fn scope_for(&self, subscriptions: &[Subscription], kind: HazardKind) -> AlertScope {
        let locations = subscriptions
            .iter()
            .filter(|subscription| subscription.wants(kind))
            .map(|subscription| subscription.location.as_str());
        let cities = self.catalog.expand(locations);
        AlertScope::new(self.catalog, cities, self.quake_radius_km)
    }

    /// Fetch every enabled hazard for `subscriptions` concurrently.
    ///
    /// Feed failures degrade to fallback records and a failing local report
    /// store to an empty report list; neither is an error.
    ///
    /// # Errors
    ///
    /// Returns [`FetchCancelled`] when `cancel` fires before every feed
    /// has answered.
    pub async fn get_alerts(
        &self,
        subscriptions: &[Subscription],
        cancel: &CancelToken,
    ) -> Result<AlertDigest, FetchCancelled> {
        let quake_scope = self.scope_for(subscriptions, HazardKind::Quake);
        let road_scope = self.scope_for(subscriptions, HazardKind::Road);
        let weather_scope = self.scope_for(subscriptions, HazardKind::Weather);
        let community_scope = self.scope_for(subscriptions, HazardKind::Community);
        debug!(
            subscriptions = subscriptions.len(),
            quake_cities = quake_scope.cities().len(),
            road_cities = road_scope.cities().len(),
            weather_regions = weather_scope.regions().len(),
            "aggregating alerts"
        );

        let (quakes, roads, weather) = tokio::join!(
            self.quakes.fetch(&quake_scope, cancel),
            self.roads.fetch(&road_scope, cancel),
            self.weather.fetch(&weather_scope, cancel),
        );
        let mut quakes = quakes?;
        let mut roads = roads?;
        let weather = weather?;

        quakes
            .data
            .sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        roads.data.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));

        Ok(AlertDigest {
            quakes,
            roads,
            weather,
            community: self.community_reports(&community_scope),
        })
    }

    /// Clear every feed cache.
    pub fn refresh(&self) {
        self.quakes.refresh();
        self.roads.refresh();
        self.weather.refresh();
        debug!("feed caches cleared");
    }

    fn community_reports(&self, scope: &AlertScope) -> Vec<CommunityReport> {
        if scope.is_empty() {
            return Vec::new();
        }
        self.reports.list_for(scope.cities()).unwrap_or_else(|error| {
            warn!(%error, "community reports unavailable");
            Vec::new()
        })
    }
}
