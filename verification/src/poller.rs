//! Periodic re-read of the seeker's sent list.
//!
//! The request book has no change notifications, so the portal polls. Each
//! tick re-reads the store and publishes the snapshot only when it differs
//! from the last one. The task ends once every receiver has been dropped.

use std::time::Duration;

use kavach_ledger::RequestBook;
use kavach_types::KycRequest;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Default polling period of the sent-list screen.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2500);

/// Shortest polling period. Anything shorter, zero included, is raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

pub struct SentRequestPoller {
    book: RequestBook,
    org: String,
    period: Duration,
}

impl SentRequestPoller {
    pub fn new(book: RequestBook, org: impl Into<String>, period: Duration) -> Self {
        Self {
            book,
            org: org.into(),
            period: period.max(MIN_POLL_INTERVAL),
        }
    }

    fn snapshot(&self) -> Option<Vec<KycRequest>> {
        match self.book.sent_by(&self.org) {
            Ok(requests) => Some(requests),
            Err(e) => {
                warn!(org = %self.org, error = %e, "failed to read sent requests");
                None
            }
        }
    }

    /// Start polling on the current runtime.
    ///
    /// The receiver starts out holding the list as of this call.
    pub fn spawn(self) -> (watch::Receiver<Vec<KycRequest>>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(self.snapshot().unwrap_or_default());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately and the initial snapshot is already out.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = tx.closed() => {
                        debug!(org = %self.org, "sent-list poller stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let Some(latest) = self.snapshot() else { continue };
                        let changed = tx.send_if_modified(|current| {
                            if *current == latest {
                                false
                            } else {
                                *current = latest;
                                true
                            }
                        });
                        if changed {
                            debug!(org = %self.org, "sent list changed");
                        }
                    }
                }
            }
        });

        (rx, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kavach_ledger::{LedgerContext, NewRequest};
    use kavach_nullables::{NullClock, NullRandom, NullStore};
    use kavach_types::RequestStatus;
    use std::sync::Arc;

    fn book() -> RequestBook {
        RequestBook::new(LedgerContext::new(
            Arc::new(NullStore::new()),
            Arc::new(NullClock::default()),
            Arc::new(NullRandom::default()),
        ))
    }

    fn new_request(org: &str) -> NewRequest {
        NewRequest {
            org: org.into(),
            purpose: "Account opening".into(),
            fields: vec!["name".into()],
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_status_changes() {
        let book = book();
        let sent = book.create(new_request("HDFC Bank")).unwrap();
        let (mut rx, _handle) =
            SentRequestPoller::new(book.clone(), "HDFC Bank", DEFAULT_POLL_INTERVAL).spawn();
        assert_eq!(rx.borrow().len(), 1);

        book.transition(&sent.id, RequestStatus::Granted).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].status, RequestStatus::Granted);
    }

    #[tokio::test(start_paused = true)]
    async fn ignores_other_organisations() {
        let book = book();
        let (mut rx, _handle) =
            SentRequestPoller::new(book.clone(), "HDFC Bank", DEFAULT_POLL_INTERVAL).spawn();
        book.create(new_request("ICICI Bank")).unwrap();

        tokio::time::sleep(DEFAULT_POLL_INTERVAL * 3).await;
        assert!(!rx.has_changed().unwrap());
        assert!(rx.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_raised_to_the_minimum() {
        let book = book();
        let sent = book.create(new_request("HDFC Bank")).unwrap();
        let (mut rx, handle) =
            SentRequestPoller::new(book.clone(), "HDFC Bank", Duration::ZERO).spawn();

        book.transition(&sent.id, RequestStatus::Denied).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].status, RequestStatus::Denied);

        drop(rx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_receiver_dropped() {
        let (rx, handle) =
            SentRequestPoller::new(book(), "HDFC Bank", DEFAULT_POLL_INTERVAL).spawn();
        drop(rx);
        tokio::time::timeout(Duration::from_secs(10), handle)
            .await
            .expect("poller should stop")
            .unwrap();
    }
}
