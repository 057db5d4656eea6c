//! Cooperative cancellation for in-flight feed fetches.
//!
//! A [`CancelHandle`] owns the signal; any number of [`CancelToken`] clones
//! observe it. Dropping the handle without cancelling leaves tokens pending
//! forever, so a fetch is only ever aborted by an explicit `cancel()`.

use tokio::sync::watch;

/// Owner side of a cancellation signal.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

/// Observer side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelToken {
    receiver: watch::Receiver<bool>,
}

impl CancelHandle {
    /// Create a handle and its first token.
    #[must_use]
    pub fn pair() -> (Self, CancelToken) {
        let (sender, receiver) = watch::channel(false);
        (Self { sender }, CancelToken { receiver })
    }

    /// Create another token observing this handle.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        CancelToken {
            receiver: self.sender.subscribe(),
        }
    }

    /// Signal cancellation to every token. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl CancelToken {
    /// A token that is never cancelled.
    #[must_use]
    pub fn never() -> Self {
        let (_sender, receiver) = watch::channel(false);
        Self { receiver }
    }

    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once cancellation is signalled.
    ///
    /// Pends forever if the handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn cancel_wakes_every_token() {
        let (handle, first) = CancelHandle::pair();
        let second = handle.token();
        assert!(!first.is_cancelled());

        handle.cancel();
        timeout(Duration::from_secs(1), first.cancelled())
            .await
            .expect("first token wakes");
        timeout(Duration::from_secs(1), second.cancelled())
            .await
            .expect("second token wakes");
        assert!(second.is_cancelled());
    }

    #[tokio::test]
    async fn dropped_handle_does_not_cancel() {
        let (handle, token) = CancelHandle::pair();
        drop(handle);
        let outcome = timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(outcome.is_err(), "token must stay pending");
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn never_token_stays_pending() {
        let token = CancelToken::never();
        let outcome = timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(outcome.is_err());
    }
}
