//! DTOs for decoding GeoNet quake GeoJSON.
//!
//! Features decode into these transport DTOs first and map into
//! `QuakeAlert`s in one pass.

use chrono::{DateTime, Utc};
use nz_regions::Coordinate;
use serde::Deserialize;

use crate::domain::records::{QuakeAlert, QuakeSeverity};

#[derive(Debug, Deserialize)]
pub(super) struct QuakeCollectionDto {
    #[serde(default)]
    pub(super) features: Vec<QuakeFeatureDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuakeFeatureDto {
    pub(super) geometry: Option<PointDto>,
    pub(super) properties: QuakePropertiesDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct PointDto {
    #[serde(default)]
    pub(super) coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct QuakePropertiesDto {
    #[serde(rename = "publicID")]
    pub(super) public_id: String,
    pub(super) time: DateTime<Utc>,
    #[serde(default)]
    pub(super) depth: f64,
    pub(super) magnitude: f64,
    #[serde(default)]
    pub(super) mmi: Option<i8>,
    #[serde(default)]
    pub(super) locality: String,
}

impl QuakeCollectionDto {
    pub(super) fn into_domain_quakes(self) -> Result<Vec<QuakeAlert>, String> {
        self.features
            .into_iter()
            .map(QuakeFeatureDto::into_domain_quake)
            .collect()
    }
}

impl QuakeFeatureDto {
    fn into_domain_quake(self) -> Result<QuakeAlert, String> {
        let properties = self.properties;
        // GeoJSON positions are [longitude, latitude].
        let coordinate = match self.geometry.as_ref().map(|point| point.coordinates.as_slice()) {
            Some([longitude, latitude, ..]) => Coordinate::new(*latitude, *longitude),
            _ => return Err(format!("quake {} missing coordinates", properties.public_id)),
        };
        if !coordinate.is_valid() {
            return Err(format!(
                "quake {} includes invalid coordinates",
                properties.public_id
            ));
        }

        let mmi = properties.mmi.filter(|value| *value >= 0);
        Ok(QuakeAlert {
            severity: QuakeSeverity::classify(mmi, properties.magnitude),
            id: properties.public_id,
            magnitude: properties.magnitude,
            depth_km: properties.depth,
            mmi,
            locality: properties.locality,
            coordinate,
            occurred_at: properties.time,
            nearest_city: None,
            distance_km: None,
        })
    }
}
