//! Runtime configuration loaded via OrthoConfig.
//!
//! Values layer as defaults, then config file, then `ALERTS_*` environment
//! variables. Every field is optional; accessors supply the defaults.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    DEFAULT_CACHE_TTL, DEFAULT_FALLBACK_SEED, DEFAULT_FEED_TIMEOUT, DEFAULT_QUAKE_RADIUS_KM,
};
use crate::outbound::DEFAULT_USER_AGENT;
use crate::outbound::geonet::{DEFAULT_GEONET_ENDPOINT, DEFAULT_MIN_MMI};
use crate::outbound::metservice::DEFAULT_METSERVICE_ENDPOINT;
use crate::outbound::nzta::DEFAULT_NZTA_ENDPOINT;

const DEFAULT_DATA_DIR: &str = ".nz-alerts";

/// Settings for feeds, caching, fallback and local storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ALERTS")]
pub struct AlertsSettings {
    /// GeoNet quake endpoint override.
    pub geonet_endpoint: Option<String>,
    /// NZTA road events endpoint override.
    pub nzta_endpoint: Option<String>,
    /// MetService warnings endpoint override.
    pub metservice_endpoint: Option<String>,
    /// Per-request upstream timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Feed cache lifetime in seconds.
    pub cache_ttl_secs: Option<u64>,
    /// Directory holding subscriptions, session and reports.
    pub data_dir: Option<PathBuf>,
    /// Seed for fallback record generation.
    pub fallback_seed: Option<u64>,
    /// Radius within which quakes are attributed to a subscribed city.
    pub quake_radius_km: Option<f64>,
    /// Lowest MMI requested from GeoNet.
    pub min_mmi: Option<i8>,
    /// User agent sent to upstream feeds.
    pub user_agent: Option<String>,
}

impl AlertsSettings {
    /// Configured GeoNet endpoint, or the public API.
    #[must_use]
    pub fn geonet_endpoint(&self) -> &str {
        self.geonet_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GEONET_ENDPOINT)
    }

    /// Configured NZTA endpoint, or the public feed.
    #[must_use]
    pub fn nzta_endpoint(&self) -> &str {
        self.nzta_endpoint.as_deref().unwrap_or(DEFAULT_NZTA_ENDPOINT)
    }

    /// Configured MetService endpoint, or the public feed.
    #[must_use]
    pub fn metservice_endpoint(&self) -> &str {
        self.metservice_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_METSERVICE_ENDPOINT)
    }

    /// Upstream request timeout; zero is raised to one second.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map_or(DEFAULT_FEED_TIMEOUT, |secs| Duration::from_secs(secs.max(1)))
    }

    /// Feed cache lifetime.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl_secs
            .map_or(DEFAULT_CACHE_TTL, Duration::from_secs)
    }

    /// Local state directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Fallback generator seed.
    #[must_use]
    pub fn fallback_seed(&self) -> u64 {
        self.fallback_seed.unwrap_or(DEFAULT_FALLBACK_SEED)
    }

    /// Quake attribution radius; non-finite or negative values use the default.
    #[must_use]
    pub fn quake_radius_km(&self) -> f64 {
        self.quake_radius_km
            .filter(|radius| radius.is_finite() && *radius >= 0.0)
            .unwrap_or(DEFAULT_QUAKE_RADIUS_KM)
    }

    /// Lowest MMI requested from GeoNet.
    #[must_use]
    pub fn min_mmi(&self) -> i8 {
        self.min_mmi.unwrap_or(DEFAULT_MIN_MMI)
    }

    /// User agent for upstream requests.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}
