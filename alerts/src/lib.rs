//! Hazard alerts for New Zealand cities and regions.
//!
//! Earthquakes from GeoNet, road events from NZTA and weather warnings from
//! MetService are fetched concurrently, cached briefly and narrowed to the
//! cities a user subscribes to. A feed that fails, stalls or returns nothing
//! is replaced by deterministic generated records tagged as fallback data.
//!
//! - [`domain`] holds scopes, caching, fallback, local state services and
//!   the aggregation fan-out behind small ports.
//! - [`outbound`] implements those ports over HTTP and the filesystem.
//! - [`config`] and [`app`] load settings and wire everything together.

pub mod app;
pub mod config;
pub mod domain;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
