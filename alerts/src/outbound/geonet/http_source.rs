//! Reqwest-backed GeoNet quake source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::QuakeCollectionDto;
use crate::domain::ports::{FeedSource, FeedSourceError};
use crate::domain::records::QuakeAlert;
use crate::outbound::http::{FeedHttpIdentity, build_client, decode_error, get_body};

/// Public GeoNet quake endpoint.
pub const DEFAULT_GEONET_ENDPOINT: &str = "https://api.geonet.org.nz/quake";
/// Lowest Modified Mercalli intensity requested by default.
pub const DEFAULT_MIN_MMI: i8 = 3;

const GEONET_ACCEPT: &str = "application/vnd.geo+json;version=2";

/// Quake source performing `GET {endpoint}?MMI={min_mmi}`.
pub struct GeoNetHttpSource {
    client: Client,
    endpoint: Url,
    min_mmi: i8,
}

impl GeoNetHttpSource {
    /// Build a source with the default identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration, min_mmi: i8) -> Result<Self, reqwest::Error> {
        Self::with_identity(endpoint, timeout, min_mmi, &FeedHttpIdentity::default())
    }

    /// Build a source with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        endpoint: Url,
        timeout: Duration,
        min_mmi: i8,
        identity: &FeedHttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout, identity)?,
            endpoint,
            min_mmi: min_mmi.clamp(-1, 8),
        })
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("MMI", &self.min_mmi.to_string());
        url
    }
}

#[async_trait]
impl FeedSource for GeoNetHttpSource {
    type Record = QuakeAlert;

    fn name(&self) -> &'static str {
        "geonet"
    }

    async fn fetch_records(&self) -> Result<Vec<QuakeAlert>, FeedSourceError> {
        let body = get_body(&self.client, self.request_url(), GEONET_ACCEPT).await?;
        parse_quakes(&body)
    }
}

fn parse_quakes(body: &[u8]) -> Result<Vec<QuakeAlert>, FeedSourceError> {
    let decoded: QuakeCollectionDto =
        serde_json::from_slice(body).map_err(|error| decode_error("GeoNet", &error))?;
    let mut quakes = decoded
        .into_domain_quakes()
        .map_err(FeedSourceError::decode)?;
    quakes.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    Ok(quakes)
}
