//! Hazard categories and per-subscription toggles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of alert a user can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    /// GeoNet earthquake reports.
    Quake,
    /// NZTA road closures and incidents.
    Road,
    /// Reports submitted by other users.
    Community,
    /// MetService weather warnings.
    Weather,
}

impl HazardKind {
    /// Every hazard kind in display order.
    pub const ALL: [Self; 4] = [Self::Quake, Self::Road, Self::Community, Self::Weather];

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quake => "quake",
            Self::Road => "road",
            Self::Community => "community",
            Self::Weather => "weather",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown hazard label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hazard kind '{0}'; expected quake, road, community, or weather")]
pub struct UnknownHazardKind(pub String);

impl FromStr for HazardKind {
    type Err = UnknownHazardKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "quake" | "quakes" | "earthquake" => Ok(Self::Quake),
            "road" | "roads" => Ok(Self::Road),
            "community" | "report" | "reports" => Ok(Self::Community),
            "weather" => Ok(Self::Weather),
            _ => Err(UnknownHazardKind(raw.to_owned())),
        }
    }
}

/// Per-hazard opt-in flags carried by a subscription.
///
/// Every flag defaults to `true`, matching a fresh subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HazardToggles {
    /// Earthquake alerts enabled.
    pub quake: bool,
    /// Road alerts enabled.
    pub road: bool,
    /// Community reports enabled.
    pub community: bool,
    /// Weather warnings enabled.
    pub weather: bool,
}

impl Default for HazardToggles {
    fn default() -> Self {
        Self::all()
    }
}

impl HazardToggles {
    /// Every hazard enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            quake: true,
            road: true,
            community: true,
            weather: true,
        }
    }

    /// Every hazard disabled.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            quake: false,
            road: false,
            community: false,
            weather: false,
        }
    }

    /// Whether `kind` is enabled.
    #[must_use]
    pub const fn is_enabled(&self, kind: HazardKind) -> bool {
        match kind {
            HazardKind::Quake => self.quake,
            HazardKind::Road => self.road,
            HazardKind::Community => self.community,
            HazardKind::Weather => self.weather,
        }
    }

    /// Set the flag for `kind`.
    pub const fn set(&mut self, kind: HazardKind, enabled: bool) {
        match kind {
            HazardKind::Quake => self.quake = enabled,
            HazardKind::Road => self.road = enabled,
            HazardKind::Community => self.community = enabled,
            HazardKind::Weather => self.weather = enabled,
        }
    }

    /// Flip the flag for `kind` and return its new value.
    pub const fn toggle(&mut self, kind: HazardKind) -> bool {
        let enabled = !self.is_enabled(kind);
        self.set(kind, enabled);
        enabled
    }

    /// Copy with every kind in `disabled` switched off.
    #[must_use]
    pub fn without(mut self, disabled: &[HazardKind]) -> Self {
        for kind in disabled {
            self.set(*kind, false);
        }
        self
    }
}
