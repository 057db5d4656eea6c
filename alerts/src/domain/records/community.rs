//! Community-submitted hazard reports.

use chrono::{DateTime, Utc};
use nz_regions::Coordinate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a community report is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    /// Surface flooding.
    Flooding,
    /// Vegetation or structure fire.
    Fire,
    /// Loss of power.
    PowerOutage,
    /// Debris, potholes, fallen trees on the road.
    RoadHazard,
    /// Slips and landslides.
    Landslide,
    /// Anything else.
    Other,
}

/// User input for a new report, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    /// Report category.
    pub category: ReportCategory,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// City the report concerns.
    pub city: String,
}

/// A validated, stored community report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityReport {
    /// Locally generated identifier.
    pub id: Uuid,
    /// Report category.
    pub category: ReportCategory,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Canonical city name.
    pub city: String,
    /// City coordinate from the catalogue.
    pub coordinate: Coordinate,
    /// Email of the signed-in reporter, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}
