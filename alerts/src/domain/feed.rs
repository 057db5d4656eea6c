//! One hazard feed: cache, live source, timeout and scoped fallback.
//!
//! A [`HazardFeed`] never surfaces upstream failures. It answers from its
//! cache when fresh, otherwise from the live source, and substitutes
//! generated records when the source fails, times out or returns nothing.
//! Only cancellation escapes as an error.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::cancellation::CancelToken;
use super::fallback::FallbackGenerator;
use super::ports::FeedSource;
use super::scope::{AlertScope, ScopedRecord};
use super::sourced::Sourced;
use super::ttl_cache::TtlCache;

/// Default upper bound on one upstream call.
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(10);

/// The caller cancelled a fetch before it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("feed fetch cancelled")]
pub struct FetchCancelled;

/// A cached, fallback-backed view over one upstream feed.
pub struct HazardFeed<R> {
    source: Arc<dyn FeedSource<Record = R>>,
    fallback: Arc<dyn FallbackGenerator<Record = R>>,
    cache: TtlCache<Vec<R>>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl<R: ScopedRecord> HazardFeed<R> {
    /// Assemble a feed from its collaborators.
    pub fn new(
        source: Arc<dyn FeedSource<Record = R>>,
        fallback: Arc<dyn FallbackGenerator<Record = R>>,
        cache: TtlCache<Vec<R>>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            fallback,
            cache,
            clock,
            timeout,
        }
    }

    /// Records relevant to `scope`, tagged with where they came from.
    ///
    /// # Errors
    ///
    /// Returns [`FetchCancelled`] when `cancel` fires first. Nothing is
    /// cached in that case.
    pub async fn fetch(
        &self,
        scope: &AlertScope,
        cancel: &CancelToken,
    ) -> Result<Sourced<Vec<R>>, FetchCancelled> {
        let feed = self.source.name();
        if scope.is_empty() {
            return Ok(Sourced::skipped());
        }
        if cancel.is_cancelled() {
            return Err(FetchCancelled);
        }
        if let Some(records) = self.cache.get() {
            debug!(feed, hazard = %R::KIND, count = records.len(), "serving cached records");
            return Ok(Sourced::cached(scoped(records, scope)));
        }

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(feed, hazard = %R::KIND, "fetch cancelled");
                return Err(FetchCancelled);
            }
            outcome = timeout(self.timeout, self.source.fetch_records()) => outcome,
        };

        let reason = match outcome {
            Ok(Ok(records)) if !records.is_empty() => {
                debug!(feed, hazard = %R::KIND, count = records.len(), "live fetch succeeded");
                self.cache.set(records.clone());
                return Ok(Sourced::live(scoped(records, scope)));
            }
            Ok(Ok(_)) => "empty",
            Ok(Err(error)) => {
                warn!(feed, hazard = %R::KIND, %error, "live fetch failed");
                error.reason()
            }
            Err(_) => "timeout",
        };

        let records = self.fallback.generate(scope, self.clock.utc());
        warn!(
            feed,
            hazard = %R::KIND,
            reason,
            count = records.len(),
            "serving fallback records"
        );
        Ok(Sourced::fallback(records, format!("{feed} {reason}")))
    }

    /// Drop the cached payload so the next fetch goes upstream.
    pub fn refresh(&self) {
        self.cache.clear();
    }

    /// Whether the cache currently holds a fresh payload.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.is_fresh()
    }
}

fn scoped<R: ScopedRecord>(records: Vec<R>, scope: &AlertScope) -> Vec<R> {
    records
        .into_iter()
        .filter_map(|record| record.scoped(scope))
        .collect()
}
