//! Test utilities for the alerts crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Only
//! compiled for tests or with the `test-support` feature.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{FeedSource, FeedSourceError};

/// Clock whose instant only moves when a test moves it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        *self.lock_clock() += to_delta(delta);
    }

    /// Move back by `delta`.
    pub fn rewind(&self, delta: Duration) {
        *self.lock_clock() -= to_delta(delta);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

fn to_delta(delta: Duration) -> TimeDelta {
    match TimeDelta::from_std(delta) {
        Ok(converted) => converted,
        Err(error) => panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}"),
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Feed source replaying a script of responses in order.
///
/// Once the script runs out the source fails with a transport error, so a
/// test that expects no further upstream calls notices extra ones.
pub struct ScriptedFeedSource<R> {
    name: &'static str,
    script: Mutex<VecDeque<Result<Vec<R>, FeedSourceError>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl<R> ScriptedFeedSource<R> {
    /// Source named `name` answering with `script` in order.
    pub fn new(
        name: &'static str,
        script: impl IntoIterator<Item = Result<Vec<R>, FeedSourceError>>,
    ) -> Self {
        Self {
            name,
            script: Mutex::new(script.into_iter().collect()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleep for `delay` before answering each call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `fetch_records` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> Option<Result<Vec<R>, FeedSourceError>> {
        match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(_) => panic!("script mutex"),
        }
    }
}

#[async_trait]
impl<R: Send + Sync> FeedSource for ScriptedFeedSource<R> {
    type Record = R;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_records(&self) -> Result<Vec<R>, FeedSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_response()
            .unwrap_or_else(|| Err(FeedSourceError::transport("script exhausted")))
    }
}
