//! User subscriptions to cities and regions.

use chrono::{DateTime, Utc};
use nz_regions::RegionCatalog;
use serde::{Deserialize, Serialize};

use super::hazard::{HazardKind, HazardToggles};

/// Whether a subscription names a single city or a whole region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTarget {
    /// One city; unknown names are treated as cities too.
    City,
    /// A region, expanded to its member cities during aggregation.
    Region,
}

impl SubscriptionTarget {
    /// Classify `location` against the catalogue.
    ///
    /// Region names win over identically named cities (`"Auckland"`), so a
    /// subscription to a name shared by a region and its main city covers
    /// the whole region.
    #[must_use]
    pub fn resolve(catalog: &RegionCatalog, location: &str) -> Self {
        if catalog.region(location).is_some() {
            Self::Region
        } else {
            Self::City
        }
    }
}

/// A user's opt-in to alerts for one location.
///
/// Persisted as part of a JSON array under the `subscriptions` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Client-generated millisecond timestamp string.
    pub id: String,
    /// City or region name as entered.
    pub location: String,
    /// Resolved target kind.
    pub target: SubscriptionTarget,
    /// Per-hazard opt-in flags.
    #[serde(default)]
    pub hazards: HazardToggles,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Whether this subscription wants alerts of `kind`.
    #[must_use]
    pub const fn wants(&self, kind: HazardKind) -> bool {
        self.hazards.is_enabled(kind)
    }
}
