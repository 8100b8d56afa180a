//! Background persistence with bounded retry
//!
//! Saves never block the event path: `enqueue` snapshots the profile and
//! hands it to a spawned task. Transient store failures back off
//! exponentially up to the retry limit; stale-version rejections are
//! dropped on the floor because a newer snapshot is already queued or
//! persisted. Exhausted retries surface through the notification port so
//! the player learns their progress is at risk.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use fateloom_domain::Profile;
use fateloom_ports::{NotificationPort, ProfileStorePort, StoreError};

/// Queues profile snapshots for asynchronous persistence
pub struct SaveQueue {
    store: Arc<dyn ProfileStorePort>,
    notifier: Arc<dyn NotificationPort>,
    retry_limit: u32,
    backoff_base: Duration,
}

impl SaveQueue {
    pub fn new(
        store: Arc<dyn ProfileStorePort>,
        notifier: Arc<dyn NotificationPort>,
        retry_limit: u32,
        backoff_base: Duration,
    ) -> Self {
        Self {
            store,
            notifier,
            retry_limit,
            backoff_base,
        }
    }

    /// Persists a snapshot in the background; returns immediately
    pub fn enqueue(&self, profile: Profile) {
        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);
        let retry_limit = self.retry_limit;
        let backoff_base = self.backoff_base;
        tokio::spawn(async move {
            Self::persist_with_retry(store, notifier, profile, retry_limit, backoff_base).await;
        });
    }

    #[instrument(skip_all, fields(profile = %profile.id, version = profile.version))]
    pub(crate) async fn persist_with_retry(
        store: Arc<dyn ProfileStorePort>,
        notifier: Arc<dyn NotificationPort>,
        profile: Profile,
        retry_limit: u32,
        backoff_base: Duration,
    ) {
        let profile_id = profile.id;
        for attempt in 1..=retry_limit {
            match store.save(profile_id, profile.clone()).await {
                Ok(()) => {
                    debug!(attempt, "Profile saved");
                    return;
                }
                Err(StoreError::StaleVersion { stored, attempted }) => {
                    // A newer snapshot won the race; this one is obsolete.
                    debug!(stored, attempted, "Dropping stale snapshot");
                    return;
                }
                Err(error) if !error.is_retryable() => {
                    warn!(%error, "Save failed with a non-retryable error");
                    notifier.save_failed(profile_id, error.to_string()).await;
                    return;
                }
                Err(error) => {
                    warn!(attempt, retry_limit, %error, "Save failed; will retry");
                    if attempt < retry_limit {
                        sleep(backoff_base * 2u32.pow(attempt - 1)).await;
                    } else {
                        notifier.save_failed(profile_id, error.to_string()).await;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fateloom_domain::ProfileId;
    use fateloom_ports::{MockNotificationPort, MockProfileStorePort};

    #[tokio::test]
    async fn test_transient_failures_retry_until_success() {
        let mut store = MockProfileStorePort::new();
        let mut failures = 2;
        store.expect_save().times(3).returning(move |_, _| {
            if failures > 0 {
                failures -= 1;
                Err(StoreError::Unavailable("disk busy".to_string()))
            } else {
                Ok(())
            }
        });
        let mut notifier = MockNotificationPort::new();
        notifier.expect_save_failed().times(0).returning(|_, _| ());

        SaveQueue::persist_with_retry(
            Arc::new(store),
            Arc::new(notifier),
            Profile::new(ProfileId::new()),
            5,
            Duration::from_millis(1),
        )
        .await;
    }

    #[tokio::test]
    async fn test_stale_version_is_dropped_without_retry() {
        let mut store = MockProfileStorePort::new();
        store.expect_save().times(1).returning(|_, _| {
            Err(StoreError::StaleVersion {
                stored: 9,
                attempted: 4,
            })
        });
        let mut notifier = MockNotificationPort::new();
        notifier.expect_save_failed().times(0).returning(|_, _| ());

        SaveQueue::persist_with_retry(
            Arc::new(store),
            Arc::new(notifier),
            Profile::new(ProfileId::new()),
            5,
            Duration::from_millis(1),
        )
        .await;
    }

    #[tokio::test]
    async fn test_exhausted_retries_notify_the_player() {
        let mut store = MockProfileStorePort::new();
        store
            .expect_save()
            .times(3)
            .returning(|_, _| Err(StoreError::Unavailable("disk gone".to_string())));
        let mut notifier = MockNotificationPort::new();
        notifier.expect_save_failed().times(1).returning(|_, _| ());

        SaveQueue::persist_with_retry(
            Arc::new(store),
            Arc::new(notifier),
            Profile::new(ProfileId::new()),
            3,
            Duration::from_millis(1),
        )
        .await;
    }

    #[tokio::test]
    async fn test_serialization_failure_does_not_retry() {
        let mut store = MockProfileStorePort::new();
        store
            .expect_save()
            .times(1)
            .returning(|_, _| Err(StoreError::Serialization("bad json".to_string())));
        let mut notifier = MockNotificationPort::new();
        notifier.expect_save_failed().times(1).returning(|_, _| ());

        SaveQueue::persist_with_retry(
            Arc::new(store),
            Arc::new(notifier),
            Profile::new(ProfileId::new()),
            5,
            Duration::from_millis(1),
        )
        .await;
    }
}
