//! Single-slot cache with a fixed time-to-live.
//!
//! Each hazard feed owns one `TtlCache` holding its last successful upstream
//! payload. Time is read from an injected [`Clock`] so expiry can be driven
//! deterministically in tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::debug;

/// Default lifetime of a cached feed payload.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// A payload and the instant it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<T> {
    /// Cached payload.
    pub value: T,
    /// When the payload was stored.
    pub stored_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Whether the entry is still inside `ttl` at `now`.
    ///
    /// The window is half-open: an entry read exactly `ttl` after it was
    /// stored has expired.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.stored_at) < ttl
    }
}

/// Single-slot TTL cache.
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use alerts::domain::TtlCache;
/// use mockable::DefaultClock;
///
/// let cache = TtlCache::new(Arc::new(DefaultClock), Duration::from_secs(300));
/// assert!(cache.get().is_none());
/// cache.set(vec![1, 2, 3]);
/// assert_eq!(cache.get(), Some(vec![1, 2, 3]));
/// cache.clear();
/// assert!(cache.get().is_none());
/// ```
pub struct TtlCache<T> {
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    slot: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    /// Build an empty cache with the given lifetime.
    ///
    /// Lifetimes too large for a [`TimeDelta`] saturate to its maximum.
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            slot: Mutex::new(None),
        }
    }

    /// Build an empty cache with [`DEFAULT_CACHE_TTL`].
    pub fn with_default_ttl(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, DEFAULT_CACHE_TTL)
    }

    /// Return the cached value, or `None` when empty or expired.
    ///
    /// Expired entries are evicted on read.
    pub fn get(&self) -> Option<T> {
        let now = self.clock.utc();
        let mut slot = self.lock_slot();
        let expired_at = match slot.as_ref() {
            Some(entry) if entry.is_fresh(now, self.ttl) => return Some(entry.value.clone()),
            Some(entry) => entry.stored_at,
            None => return None,
        };
        debug!(stored_at = %expired_at, "evicting expired cache entry");
        *slot = None;
        None
    }

    /// Store `value`, replacing any previous entry.
    pub fn set(&self, value: T) {
        let stored_at = self.clock.utc();
        *self.lock_slot() = Some(CacheEntry { value, stored_at });
    }

    /// Evict the current entry.
    pub fn clear(&self) {
        *self.lock_slot() = None;
    }

    /// Whether a non-expired entry is present.
    pub fn is_fresh(&self) -> bool {
        let now = self.clock.utc();
        self.lock_slot()
            .as_ref()
            .is_some_and(|entry| entry.is_fresh(now, self.ttl))
    }

    /// Configured lifetime.
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<CacheEntry<T>>> {
        // The slot holds plain data, so a panic elsewhere cannot leave it
        // half-written.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
