//! Background scheduled tasks for the application.
//!
//! The only recurring job is the expiry sweep of the in-memory verification
//! store. Expired entries are already rejected on confirm; the sweep just keeps
//! abandoned ones from piling up.

use chrono::Utc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::services::OtpStore;

/// Handle to a running sweeper. Dropping it also stops the loop; use
/// [`SweepTask::shutdown`] to wait for the task to finish.
pub struct SweepTask {
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl SweepTask {
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(e) = self.handle.await {
            log::error!("Verification sweeper ended abnormally: {e}");
        }
    }
}

/// Spawn the periodic expiry sweep. Does not block. Started through
/// [`OtpStore::spawn_sweeper`] or [`OtpStore::with_sweeper`].
pub(crate) fn spawn_otp_sweeper(store: OtpStore, every: Duration) -> SweepTask {
    let (stop, mut stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick fires immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = &mut stopped => {
                    log::info!("Verification sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = store.sweep(Utc::now()).await;
                    if removed > 0 {
                        log::info!("Expired verification codes swept: {removed}");
                    } else {
                        log::debug!("Verification sweep found nothing to remove");
                    }
                }
            }
        }
    });

    SweepTask {
        stop: Some(stop),
        handle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadPayload;

    fn payload() -> LeadPayload {
        LeadPayload {
            name: None,
            email: None,
            phone: "9990001111".into(),
            purpose: "Rent".into(),
            requirements: "1BHK".into(),
            budget: None,
            message: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_expired_entries() {
        let store = OtpStore::new(Duration::from_secs(300));
        let long_ago = Utc::now() - chrono::Duration::minutes(30);
        store.issue_at("111", payload(), long_ago).await;
        store.issue("222", payload()).await;

        let task = store.spawn_sweeper(Duration::from_secs(600));
        tokio::time::sleep(Duration::from_secs(601)).await;

        assert_eq!(store.len().await, 1);
        assert!(store.pending_code("222").await.is_some());
        task.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_returns_promptly() {
        let (_store, task) =
            OtpStore::with_sweeper(Duration::from_secs(300), Duration::from_secs(3600));
        tokio::time::timeout(Duration::from_secs(5), task.shutdown())
            .await
            .unwrap();
    }
}
