//! Provenance tagging for feed results.

use serde::{Deserialize, Serialize};

/// Where a feed result came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedOrigin {
    /// Fetched from the upstream feed during this call.
    Live,
    /// Served from the feed's TTL cache of an earlier live fetch.
    Cache,
    /// Generated locally because the upstream feed failed.
    Fallback {
        /// Why the live fetch was abandoned.
        reason: String,
    },
    /// Not requested because no subscription enabled this hazard.
    Skipped,
}

impl FeedOrigin {
    /// Whether the data reflects the upstream feed (live or cached).
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Live | Self::Cache)
    }

    /// Whether the data was substituted by the fallback generator.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// A value tagged with its [`FeedOrigin`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sourced<T> {
    /// The payload.
    pub data: T,
    /// Where it came from.
    pub origin: FeedOrigin,
}

impl<T> Sourced<T> {
    /// Tag `data` as fetched live.
    pub const fn live(data: T) -> Self {
        Self {
            data,
            origin: FeedOrigin::Live,
        }
    }

    /// Tag `data` as served from cache.
    pub const fn cached(data: T) -> Self {
        Self {
            data,
            origin: FeedOrigin::Cache,
        }
    }

    /// Tag `data` as fallback output with the failure `reason`.
    pub fn fallback(data: T, reason: impl Into<String>) -> Self {
        Self {
            data,
            origin: FeedOrigin::Fallback {
                reason: reason.into(),
            },
        }
    }

    /// Transform the payload, keeping the origin.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            origin: self.origin,
        }
    }
}

impl<T: Default> Sourced<T> {
    /// An empty payload for a hazard nobody asked for.
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            data: T::default(),
            origin: FeedOrigin::Skipped,
        }
    }
}
