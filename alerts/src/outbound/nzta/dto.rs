//! DTOs for decoding NZTA road event features.

use chrono::{DateTime, Utc};
use nz_regions::{Coordinate, RegionCatalog};
use serde::Deserialize;

use crate::domain::records::{RoadAlert, RoadEventKind, RoadStatus};

#[derive(Debug, Deserialize)]
pub(super) struct RoadEventCollectionDto {
    #[serde(default)]
    pub(super) features: Vec<RoadEventFeatureDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RoadEventFeatureDto {
    pub(super) geometry: Option<GeometryDto>,
    pub(super) properties: RoadEventPropertiesDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeometryDto {
    #[serde(default)]
    pub(super) coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RoadEventPropertiesDto {
    pub(super) event_id: String,
    #[serde(default)]
    pub(super) event_type: String,
    #[serde(default)]
    pub(super) status: String,
    #[serde(default)]
    pub(super) event_description: String,
    #[serde(default)]
    pub(super) road_name: String,
    #[serde(default)]
    pub(super) location_area: Option<String>,
    pub(super) start_date: Option<DateTime<Utc>>,
    pub(super) end_date: Option<DateTime<Utc>>,
}

impl RoadEventCollectionDto {
    pub(super) fn into_domain_roads(
        self,
        catalog: &RegionCatalog,
        fetched_at: DateTime<Utc>,
    ) -> Result<Vec<RoadAlert>, String> {
        self.features
            .into_iter()
            .map(|feature| feature.into_domain_road(catalog, fetched_at))
            .collect()
    }
}

impl RoadEventFeatureDto {
    fn into_domain_road(
        self,
        catalog: &RegionCatalog,
        fetched_at: DateTime<Utc>,
    ) -> Result<RoadAlert, String> {
        let properties = self.properties;
        let coordinate = match self.geometry.as_ref().map(|g| g.coordinates.as_slice()) {
            Some([longitude, latitude, ..]) => Coordinate::new(*latitude, *longitude),
            _ => return Err(format!("road event {} missing coordinates", properties.event_id)),
        };
        if !coordinate.is_valid() {
            return Err(format!(
                "road event {} includes invalid coordinates",
                properties.event_id
            ));
        }

        let city = catalog.nearest_city_overall(coordinate);
        let region = properties
            .location_area
            .as_deref()
            .and_then(|area| catalog.region(area))
            .or_else(|| city.and_then(|city| catalog.region_of(city.name)))
            .map(|region| region.name.to_owned());

        Ok(RoadAlert {
            id: properties.event_id,
            kind: RoadEventKind::from_label(&properties.event_type),
            status: RoadStatus::from_label(&properties.status),
            description: properties.event_description.trim().to_owned(),
            road: properties.road_name.trim().to_owned(),
            city: city.map(|city| city.name.to_owned()),
            region,
            coordinate,
            starts_at: properties.start_date.unwrap_or(fetched_at),
            ends_at: properties.end_date,
        })
    }
}
