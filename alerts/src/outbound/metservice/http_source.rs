//! Reqwest-backed MetService warning source.

use std::time::Duration;

use async_trait::async_trait;
use nz_regions::RegionCatalog;
use reqwest::{Client, Url};

use super::dto::WarningListDto;
use crate::domain::ports::{FeedSource, FeedSourceError};
use crate::domain::records::WeatherAlert;
use crate::outbound::http::{FeedHttpIdentity, build_client, decode_error, get_body};

/// Public MetService warnings endpoint.
pub const DEFAULT_METSERVICE_ENDPOINT: &str =
    "https://www.metservice.com/publicData/webdata/warnings";

/// Weather warning source; region names are canonicalised via the catalogue.
pub struct MetServiceHttpSource {
    client: Client,
    endpoint: Url,
    catalog: RegionCatalog,
}

impl MetServiceHttpSource {
    /// Build a source with the default identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        catalog: RegionCatalog,
    ) -> Result<Self, reqwest::Error> {
        Self::with_identity(endpoint, timeout, catalog, &FeedHttpIdentity::default())
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
        identity: &FeedHttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout, identity)?,
            endpoint,
            catalog,
        })
    }
}

#[async_trait]
impl FeedSource for MetServiceHttpSource {
    type Record = WeatherAlert;

    fn name(&self) -> &'static str {
        "metservice"
    }

    async fn fetch_records(&self) -> Result<Vec<WeatherAlert>, FeedSourceError> {
        let body = get_body(&self.client, self.endpoint.clone(), "application/json").await?;
        parse_warnings(&body, &self.catalog)
    }
}

fn parse_warnings(
    body: &[u8],
    catalog: &RegionCatalog,
) -> Result<Vec<WeatherAlert>, FeedSourceError> {
    let decoded: WarningListDto =
        serde_json::from_slice(body).map_err(|error| decode_error("MetService", &error))?;
    Ok(decoded.into_domain_warnings(catalog))
}
