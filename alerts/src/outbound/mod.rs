//! Outbound adapters implementing domain ports.
//!
//! - **geonet**, **nzta**, **metservice**: reqwest-backed [`FeedSource`]s
//!   for quakes, road events and weather warnings
//! - **storage**: file and in-memory [`KeyValueStore`]s for local state
//!
//! Adapters translate wire formats into domain records and contain no
//! caching or fallback logic.
//!
//! [`FeedSource`]: crate::domain::ports::FeedSource
//! [`KeyValueStore`]: crate::domain::ports::KeyValueStore

pub mod geonet;
mod http;
pub mod metservice;
pub mod nzta;
pub mod storage;

pub use http::{DEFAULT_USER_AGENT, FeedHttpIdentity};
