//! GeoNet earthquake feed adapter.
//!
//! Implements the `FeedSource` port over the GeoNet quake GeoJSON API.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_GEONET_ENDPOINT, DEFAULT_MIN_MMI, GeoNetHttpSource};
