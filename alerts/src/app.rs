//! Wiring settings, adapters and domain services into one application.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::Clock;
use nz_regions::RegionCatalog;
use url::Url;

use crate::config::AlertsSettings;
use crate::domain::ports::{FeedSource, KeyValueStore};
use crate::domain::{
    AlertAggregator, CommunityReportService, HazardFeed, QuakeAlert, QuakeFallback, RoadAlert,
    RoadFallback, SessionService, SubscriptionService, TtlCache, WeatherAlert, WeatherFallback,
};
use crate::outbound::FeedHttpIdentity;
use crate::outbound::geonet::GeoNetHttpSource;
use crate::outbound::metservice::MetServiceHttpSource;
use crate::outbound::nzta::NztaHttpSource;
use crate::outbound::storage::FileKeyValueStore;

/// Errors raised while assembling the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A configured endpoint is not a valid URL.
    #[error("invalid {feed} endpoint {url}: {source}")]
    Endpoint {
        /// Feed the endpoint belongs to.
        feed: &'static str,
        /// Configured value.
        url: String,
        /// Parse failure.
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The data directory path is not UTF-8.
    #[error("data directory {} is not valid UTF-8", .0.display())]
    NonUtf8DataDir(PathBuf),
    /// The data directory could not be opened.
    #[error("failed to open data directory {path}: {source}")]
    DataDir {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

/// Upstream sources for the three hazard feeds.
pub struct FeedSources {
    /// Earthquake source.
    pub quakes: Arc<dyn FeedSource<Record = QuakeAlert>>,
    /// Road event source.
    pub roads: Arc<dyn FeedSource<Record = RoadAlert>>,
    /// Weather warning source.
    pub weather: Arc<dyn FeedSource<Record = WeatherAlert>>,
}

impl FeedSources {
    /// HTTP sources for the configured endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] for an unparsable endpoint or when the HTTP client
    /// cannot be built.
    pub fn http(
        settings: &AlertsSettings,
        catalog: RegionCatalog,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let identity = FeedHttpIdentity {
            user_agent: settings.user_agent().to_owned(),
        };
        let timeout = settings.request_timeout();
        Ok(Self {
            quakes: Arc::new(GeoNetHttpSource::with_identity(
                parse_endpoint("geonet", settings.geonet_endpoint())?,
                timeout,
                settings.min_mmi(),
                &identity,
            )?),
            roads: Arc::new(NztaHttpSource::with_identity(
                parse_endpoint("nzta", settings.nzta_endpoint())?,
                timeout,
                catalog,
                clock,
                &identity,
            )?),
            weather: Arc::new(MetServiceHttpSource::with_identity(
                parse_endpoint("metservice", settings.metservice_endpoint())?,
                timeout,
                catalog,
                &identity,
            )?),
        })
    }
}

fn parse_endpoint(feed: &'static str, raw: &str) -> Result<Url, AppError> {
    Url::parse(raw).map_err(|source| AppError::Endpoint {
        feed,
        url: raw.to_owned(),
        source,
    })
}

/// Every service the CLI needs, sharing one store, clock and catalogue.
pub struct AlertsApp {
    /// Static region and city table.
    pub catalog: RegionCatalog,
    /// Subscription management.
    pub subscriptions: SubscriptionService,
    /// Mock sign-in.
    pub sessions: SessionService,
    /// Community reports.
    pub reports: CommunityReportService,
    /// Feed fan-out.
    pub aggregator: AlertAggregator,
}

impl AlertsApp {
    /// Build the application with HTTP feeds and the file store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when an endpoint, the HTTP client or the data
    /// directory cannot be set up.
    pub fn from_settings(
        settings: &AlertsSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let catalog = RegionCatalog::new_zealand();
        let data_dir =
            Utf8PathBuf::from_path_buf(settings.data_dir()).map_err(AppError::NonUtf8DataDir)?;
        let store = FileKeyValueStore::open(&data_dir).map_err(|source| AppError::DataDir {
            path: data_dir.clone(),
            source,
        })?;
        let sources = FeedSources::http(settings, catalog, clock.clone())?;
        Ok(Self::assemble(settings, catalog, Arc::new(store), sources, clock))
    }

    /// Build the application from explicit parts.
    pub fn assemble(
        settings: &AlertsSettings,
        catalog: RegionCatalog,
        store: Arc<dyn KeyValueStore>,
        sources: FeedSources,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let seed = settings.fallback_seed();
        let ttl = settings.cache_ttl();
        let timeout = settings.request_timeout();

        let sessions = SessionService::new(store.clone(), clock.clone());
        let reports =
            CommunityReportService::new(store.clone(), clock.clone(), catalog, sessions.clone());
        let subscriptions = SubscriptionService::new(store, clock.clone(), catalog);

        let aggregator = AlertAggregator::new(
            catalog,
            HazardFeed::new(
                sources.quakes,
                Arc::new(QuakeFallback::new(seed)),
                TtlCache::new(clock.clone(), ttl),
                clock.clone(),
                timeout,
            ),
            HazardFeed::new(
                sources.roads,
                Arc::new(RoadFallback::new(seed)),
                TtlCache::new(clock.clone(), ttl),
                clock.clone(),
                timeout,
            ),
            HazardFeed::new(
                sources.weather,
                Arc::new(WeatherFallback::new(seed)),
                TtlCache::new(clock.clone(), ttl),
                clock,
                timeout,
            ),
            reports.clone(),
            settings.quake_radius_km(),
        );

        Self {
            catalog,
            subscriptions,
            sessions,
            reports,
            aggregator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::DefaultClock;
    use ortho_config::OrthoConfig;
    use rstest::rstest;

    fn load_settings() -> AlertsSettings {
        AlertsSettings::load_from_iter([OsString::from("alerts")]).expect("config should load")
    }

    #[rstest]
    fn rejects_unparsable_endpoints() {
        let _guard = lock_env([("ALERTS_GEONET_ENDPOINT", Some("not a url".to_owned()))]);
        let settings = load_settings();

        let result = FeedSources::http(
            &settings,
            RegionCatalog::new_zealand(),
            Arc::new(DefaultClock),
        );
        assert!(matches!(
            result,
            Err(AppError::Endpoint { feed: "geonet", .. })
        ));
    }

    #[rstest]
    fn from_settings_creates_the_data_directory() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let data_dir = temp.path().join("state");
        let _guard = lock_env([
            ("ALERTS_GEONET_ENDPOINT", None),
            ("ALERTS_DATA_DIR", Some(data_dir.display().to_string())),
        ]);
        let settings = load_settings();

        let app = AlertsApp::from_settings(&settings, Arc::new(DefaultClock)).expect("app builds");
        assert!(data_dir.is_dir());
        assert!(app.subscriptions.list().expect("list").is_empty());
    }
}
