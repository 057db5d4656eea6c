//! DTOs for decoding MetService warning payloads.

use chrono::{DateTime, Utc};
use nz_regions::RegionCatalog;
use serde::Deserialize;

use crate::domain::records::{WarningLevel, WeatherAlert};

#[derive(Debug, Deserialize)]
pub(super) struct WarningListDto {
    #[serde(default)]
    pub(super) warnings: Vec<WarningDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WarningDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) level: String,
    pub(super) headline: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) regions: Vec<String>,
    pub(super) issued_at: DateTime<Utc>,
    pub(super) expires_at: DateTime<Utc>,
}

impl WarningListDto {
    pub(super) fn into_domain_warnings(self, catalog: &RegionCatalog) -> Vec<WeatherAlert> {
        self.warnings
            .into_iter()
            .map(|warning| warning.into_domain_warning(catalog))
            .collect()
    }
}

impl WarningDto {
    fn into_domain_warning(self, catalog: &RegionCatalog) -> WeatherAlert {
        // An empty level falls back to the headline, which usually names it.
        let level_label = if self.level.trim().is_empty() {
            self.headline.as_str()
        } else {
            self.level.as_str()
        };
        let level = WarningLevel::from_label(level_label);
        let regions = self
            .regions
            .iter()
            .map(|name| {
                catalog
                    .region(name)
                    .map_or_else(|| name.trim().to_owned(), |region| region.name.to_owned())
            })
            .collect();

        WeatherAlert {
            id: self.id,
            level,
            headline: self.headline,
            description: self.description,
            regions,
            issued_at: self.issued_at,
            expires_at: self.expires_at,
        }
    }
}
