//! Domain primitives, services and ports.
//!
//! Everything here is transport agnostic: HTTP feeds and the on-disk store
//! plug in through [`ports`], and time is read from an injected
//! [`mockable::Clock`].

pub mod aggregation;
pub mod cancellation;
pub mod error;
pub mod fallback;
pub mod feed;
pub mod hazard;
mod local_state;
pub mod ports;
pub mod records;
pub mod report_service;
pub mod scope;
pub mod session;
pub mod session_service;
pub mod sourced;
pub mod subscription;
pub mod subscription_service;
pub mod ttl_cache;

pub use self::aggregation::{AlertAggregator, AlertDigest};
pub use self::cancellation::{CancelHandle, CancelToken};
pub use self::error::{DomainError, ErrorCode};
pub use self::fallback::{
    DEFAULT_FALLBACK_SEED, FallbackGenerator, QuakeFallback, RoadFallback, WeatherFallback,
};
pub use self::feed::{DEFAULT_FEED_TIMEOUT, FetchCancelled, HazardFeed};
pub use self::hazard::{HazardKind, HazardToggles, UnknownHazardKind};
pub use self::records::{
    CommunityReport, QuakeAlert, QuakeSeverity, ReportCategory, ReportDraft, RoadAlert,
    RoadEventKind, RoadStatus, WarningLevel, WeatherAlert,
};
pub use self::report_service::CommunityReportService;
pub use self::scope::{AlertScope, DEFAULT_QUAKE_RADIUS_KM, ScopedRecord};
pub use self::session::Session;
pub use self::session_service::SessionService;
pub use self::sourced::{FeedOrigin, Sourced};
pub use self::subscription::{Subscription, SubscriptionTarget};
pub use self::subscription_service::SubscriptionService;
pub use self::ttl_cache::{CacheEntry, DEFAULT_CACHE_TTL, TtlCache};
