//! Behaviour tests for alert aggregation over scripted feeds.
//!
//! Feeds are replaced by scripted sources and local state lives in memory,
//! so each scenario exercises scoping, fallback and caching end to end
//! without the network.

use std::cell::RefCell;
use std::sync::Arc;

use alerts::app::{AlertsApp, FeedSources};
use alerts::config::AlertsSettings;
use alerts::domain::ports::FeedSourceError;
use alerts::domain::{
    AlertDigest, CancelToken, FeedOrigin, HazardKind, HazardToggles, QuakeAlert, QuakeSeverity,
    RoadAlert, RoadEventKind, RoadStatus, WarningLevel, WeatherAlert,
};
use alerts::outbound::storage::InMemoryKeyValueStore;
use alerts::test_support::{MutableClock, ScriptedFeedSource};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use nz_regions::{Coordinate, RegionCatalog};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

type Script<R> = Vec<Result<Vec<R>, FeedSourceError>>;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid start time")
}

fn quake(id: &str, coordinate: Coordinate) -> QuakeAlert {
    QuakeAlert {
        id: id.to_owned(),
        magnitude: 4.1,
        depth_km: 8.0,
        mmi: Some(4),
        locality: "near a city".to_owned(),
        coordinate,
        occurred_at: start() - TimeDelta::minutes(20),
        severity: QuakeSeverity::Light,
        nearest_city: None,
        distance_km: None,
    }
}

fn road(id: &str, city: &str, coordinate: Coordinate) -> RoadAlert {
    RoadAlert {
        id: id.to_owned(),
        kind: RoadEventKind::Crash,
        status: RoadStatus::Active,
        description: "Crash blocking one lane".to_owned(),
        road: "SH1".to_owned(),
        city: Some(city.to_owned()),
        region: None,
        coordinate,
        starts_at: start() - TimeDelta::minutes(5),
        ends_at: None,
    }
}

fn warning(id: &str, region: &str) -> WeatherAlert {
    WeatherAlert {
        id: id.to_owned(),
        level: WarningLevel::OrangeWarning,
        headline: format!("Heavy Rain Warning for {region}"),
        description: String::new(),
        regions: vec![region.to_owned()],
        issued_at: start() - TimeDelta::hours(1),
        expires_at: start() + TimeDelta::hours(11),
    }
}

struct AggregationWorld {
    runtime: Runtime,
    pending_subscriptions: RefCell<Vec<(String, HazardToggles)>>,
    quakes: RefCell<Script<QuakeAlert>>,
    roads: RefCell<Script<RoadAlert>>,
    weather: RefCell<Script<WeatherAlert>>,
    road_source: RefCell<Option<Arc<ScriptedFeedSource<RoadAlert>>>>,
    app: RefCell<Option<AlertsApp>>,
    digest: RefCell<Option<AlertDigest>>,
}

impl AggregationWorld {
    fn new() -> Self {
        Self {
            runtime: Runtime::new().expect("create runtime"),
            pending_subscriptions: RefCell::new(Vec::new()),
            quakes: RefCell::new(Vec::new()),
            roads: RefCell::new(Vec::new()),
            weather: RefCell::new(Vec::new()),
            road_source: RefCell::new(None),
            app: RefCell::new(None),
            digest: RefCell::new(None),
        }
    }

    fn subscribe(&self, location: &str, hazards: HazardToggles) {
        self.pending_subscriptions
            .borrow_mut()
            .push((location.to_owned(), hazards));
    }

    fn build_app(&self) -> AlertsApp {
        let road_source = Arc::new(ScriptedFeedSource::new(
            "nzta",
            self.roads.take(),
        ));
        *self.road_source.borrow_mut() = Some(road_source.clone());
        let sources = FeedSources {
            quakes: Arc::new(ScriptedFeedSource::new("geonet", self.quakes.take())),
            roads: road_source,
            weather: Arc::new(ScriptedFeedSource::new("metservice", self.weather.take())),
        };
        let settings = AlertsSettings {
            geonet_endpoint: None,
            nzta_endpoint: None,
            metservice_endpoint: None,
            request_timeout_secs: Some(2),
            cache_ttl_secs: None,
            data_dir: None,
            fallback_seed: Some(11),
            quake_radius_km: None,
            min_mmi: None,
            user_agent: None,
        };
        let app = AlertsApp::assemble(
            &settings,
            RegionCatalog::new_zealand(),
            Arc::new(InMemoryKeyValueStore::default()),
            sources,
            Arc::new(MutableClock::new(start())),
        );
        for (location, hazards) in self.pending_subscriptions.take() {
            app.subscriptions
                .subscribe(&location, hazards)
                .expect("subscription stored");
        }
        app
    }

    fn fetch(&self) {
        let mut app = self.app.borrow_mut();
        let app = app.get_or_insert_with(|| self.build_app());
        let subscriptions = app.subscriptions.list().expect("list subscriptions");
        let digest = self
            .runtime
            .block_on(app.aggregator.get_alerts(&subscriptions, &CancelToken::never()))
            .expect("fetch not cancelled");
        *self.digest.borrow_mut() = Some(digest);
    }

    fn with_digest<F>(&self, f: F)
    where
        F: FnOnce(&AlertDigest),
    {
        let digest = self.digest.borrow();
        f(digest.as_ref().expect("alerts should have been fetched"));
    }
}

#[fixture]
fn world() -> AggregationWorld {
    AggregationWorld::new()
}

#[given("a subscription to {location} for every hazard")]
fn a_subscription_for_every_hazard(world: &AggregationWorld, location: String) {
    world.subscribe(&location, HazardToggles::all());
}

#[given("a subscription to {location} without {hazard} alerts")]
fn a_subscription_without_one_hazard(
    world: &AggregationWorld,
    location: String,
    hazard: HazardKind,
) {
    world.subscribe(&location, HazardToggles::all().without(&[hazard]));
}

#[given("the quake feed reports quakes near Christchurch and Auckland")]
fn quake_feed_reports_quakes(world: &AggregationWorld) {
    world.quakes.borrow_mut().push(Ok(vec![
        quake("chc", Coordinate::new(-43.58, 172.70)),
        quake("akl", Coordinate::new(-36.85, 174.76)),
    ]));
}

#[given("the road feed reports events in Christchurch and Auckland")]
fn road_feed_reports_events(world: &AggregationWorld) {
    world.roads.borrow_mut().push(Ok(vec![
        road("chc", "Christchurch", Coordinate::new(-43.53, 172.63)),
        road("akl", "Auckland", Coordinate::new(-36.85, 174.76)),
    ]));
}

#[given("the weather feed reports warnings for Canterbury and Auckland")]
fn weather_feed_reports_warnings(world: &AggregationWorld) {
    world
        .weather
        .borrow_mut()
        .push(Ok(vec![warning("can", "Canterbury"), warning("akl", "Auckland")]));
}

#[given("the road feed fails with status {status}")]
fn road_feed_fails(world: &AggregationWorld, status: u16) {
    world
        .roads
        .borrow_mut()
        .push(Err(FeedSourceError::status(status, "service unavailable")));
}

#[when("alerts are fetched")]
fn alerts_are_fetched(world: &AggregationWorld) {
    world.fetch();
}

#[when("alerts are fetched again")]
fn alerts_are_fetched_again(world: &AggregationWorld) {
    world.fetch();
}

#[then("the quake alerts are live and all near Christchurch")]
fn quake_alerts_are_near_christchurch(world: &AggregationWorld) {
    world.with_digest(|digest| {
        assert_eq!(digest.quakes.origin, FeedOrigin::Live);
        assert!(!digest.quakes.data.is_empty());
        assert!(
            digest
                .quakes
                .data
                .iter()
                .all(|quake| quake.nearest_city.as_deref() == Some("Christchurch"))
        );
    });
}

#[then("only Christchurch road events are returned")]
fn only_christchurch_roads(world: &AggregationWorld) {
    world.with_digest(|digest| {
        let ids: Vec<_> = digest.roads.data.iter().map(|road| road.id.as_str()).collect();
        assert_eq!(ids, ["chc"]);
    });
}

#[then("only Canterbury weather warnings are returned")]
fn only_canterbury_warnings(world: &AggregationWorld) {
    world.with_digest(|digest| {
        let ids: Vec<_> = digest
            .weather
            .data
            .iter()
            .map(|warning| warning.id.as_str())
            .collect();
        assert_eq!(ids, ["can"]);
    });
}

#[then("the road alerts are fallback data from a failed nzta call")]
fn road_alerts_are_fallback(world: &AggregationWorld) {
    world.with_digest(|digest| {
        assert_eq!(
            digest.roads.origin,
            FeedOrigin::Fallback {
                reason: "nzta status".to_owned()
            }
        );
        assert!(!digest.roads.data.is_empty());
    });
}

#[then("every fallback road event is in Wellington")]
fn fallback_roads_are_in_wellington(world: &AggregationWorld) {
    world.with_digest(|digest| {
        assert!(
            digest
                .roads
                .data
                .iter()
                .all(|road| road.region.as_deref() == Some("Wellington"))
        );
    });
}

#[then("the weather alerts are skipped")]
fn weather_alerts_are_skipped(world: &AggregationWorld) {
    world.with_digest(|digest| {
        assert_eq!(digest.weather.origin, FeedOrigin::Skipped);
        assert!(digest.weather.data.is_empty());
    });
}

#[then("the road alerts are served from the cache")]
fn road_alerts_are_cached(world: &AggregationWorld) {
    world.with_digest(|digest| {
        assert_eq!(digest.roads.origin, FeedOrigin::Cache);
        let ids: Vec<_> = digest.roads.data.iter().map(|road| road.id.as_str()).collect();
        assert_eq!(ids, ["chc"]);
    });
}

#[then("the road feed was called once")]
fn road_feed_called_once(world: &AggregationWorld) {
    let source = world.road_source.borrow();
    let source = source.as_ref().expect("road source built");
    assert_eq!(source.calls(), 1);
}

#[scenario(
    path = "tests/features/aggregation.feature",
    name = "A region subscription surfaces alerts for its cities"
)]
fn region_subscription_surfaces_city_alerts(world: AggregationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/aggregation.feature",
    name = "A failing feed is replaced by fallback data"
)]
fn failing_feed_is_replaced_by_fallback(world: AggregationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/aggregation.feature",
    name = "Disabled hazards are not fetched"
)]
fn disabled_hazards_are_not_fetched(world: AggregationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/aggregation.feature",
    name = "Repeat fetches are served from the cache"
)]
fn repeat_fetches_are_cached(world: AggregationWorld) {
    drop(world);
}
