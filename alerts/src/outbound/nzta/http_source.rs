//! Reqwest-backed NZTA road event source.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use nz_regions::RegionCatalog;
use reqwest::{Client, Url};

use super::dto::RoadEventCollectionDto;
use crate::domain::ports::{FeedSource, FeedSourceError};
use crate::domain::records::RoadAlert;
use crate::outbound::http::{FeedHttpIdentity, build_client, decode_error, get_body};

/// Public NZTA traffic events endpoint.
pub const DEFAULT_NZTA_ENDPOINT: &str =
    "https://www.journeys.nzta.govt.nz/assets/map-data-cache/delays.json";

/// Road event source attributing each event to its nearest catalogue city.
pub struct NztaHttpSource {
    client: Client,
    endpoint: Url,
    catalog: RegionCatalog,
    clock: Arc<dyn Clock>,
}

impl NztaHttpSource {
    /// Build a source with the default identity.
    ///
    /// Events without a start date are stamped with the clock's current
    /// instant.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        catalog: RegionCatalog,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_identity(endpoint, timeout, catalog, clock, &FeedHttpIdentity::default())
    }

    /// Build a source with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        endpoint: Url,
        timeout: Duration,
        catalog: RegionCatalog,
        clock: Arc<dyn Clock>,
        identity: &FeedHttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout, identity)?,
            endpoint,
            catalog,
            clock,
        })
    }

    fn parse_roads(&self, body: &[u8]) -> Result<Vec<RoadAlert>, FeedSourceError> {
        let decoded: RoadEventCollectionDto =
            serde_json::from_slice(body).map_err(|error| decode_error("NZTA", &error))?;
        let mut roads = decoded
            .into_domain_roads(&self.catalog, self.clock.utc())
            .map_err(FeedSourceError::decode)?;
        roads.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));
        Ok(roads)
    }
}

#[async_trait]
impl FeedSource for NztaHttpSource {
    type Record = RoadAlert;

    fn name(&self) -> &'static str {
        "nzta"
    }

    async fn fetch_records(&self) -> Result<Vec<RoadAlert>, FeedSourceError> {
        let body = get_body(&self.client, self.endpoint.clone(), "application/json").await?;
        self.parse_roads(&body)
    }
}
