use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{error, info};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error_handling::types::DirectoryError;
use crate::sessions::directory::SessionDirectory;
use crate::store::submission_store::SubmissionStore;

/// Session-expiry reaper.
///
/// A single background task that wakes on a fixed period, flips sessions
/// past their expiry inactive and purges their submissions from the store.
/// It also re-sweeps every already-inactive session, so the store never
/// retains data for a dashboard deactivated by another code path (manual
/// close, crash recovery).
pub struct Reaper<D: SessionDirectory> {
    store: Arc<SubmissionStore>,
    directory: Arc<D>,
    period: Duration,
}

/// Stop signal and join handle for a spawned reaper.
pub struct ReaperHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the reaper to stop and waits for the task to finish.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}

impl<D: SessionDirectory> Reaper<D> {
    pub fn new(store: Arc<SubmissionStore>, directory: Arc<D>, period: Duration) -> Self {
        Self {
            store,
            directory,
            period,
        }
    }

    /// Launches the perpetual sweep task. Fire-and-forget for the host; use
    /// the returned handle for deterministic shutdown in tests and on
    /// graceful exit.
    pub fn spawn(self) -> ReaperHandle {
        let (stop, mut stopped) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately; skip it so the first
            // sweep happens one full period after startup
            ticker.tick().await;
            info!("Session expiry reaper started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_cycle().await {
                            error!("Error in expiry sweep: {}", e);
                        }
                    }
                    _ = stopped.changed() => {
                        info!("Session expiry reaper stopped");
                        break;
                    }
                }
            }
        });
        ReaperHandle { stop, task }
    }

    /// One sweep: expire overdue active sessions, then purge submissions of
    /// every inactive session. A directory failure aborts the current sweep
    /// only; the affected sessions stay active and are re-evaluated on the
    /// next cycle.
    pub async fn run_cycle(&self) -> Result<(), DirectoryError> {
        let now = Utc::now();
        for session in self.directory.active_sessions().await? {
            if session.is_expired(now) {
                self.directory.deactivate(session.id).await?;
                self.store.purge_dashboard(session.id);
                info!("Expired dashboard session {}", session.id);
            }
        }
        for session in self.directory.inactive_sessions().await? {
            self.store.purge_dashboard(session.id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::memory_directory::MemoryDirectory;
    use crate::store::types::Submission;
    use chrono::Duration as ChronoDuration;
    use uuid::Uuid;

    fn submission(dashboard_id: i32, guest_name: &str) -> Submission {
        Submission {
            submission_id: Uuid::new_v4(),
            dashboard_id,
            guest_name: guest_name.to_string(),
            dob: None,
            rg: None,
            cpf: None,
            address: None,
            answers: Vec::new(),
            narrative: None,
            crime_type: "outros".into(),
            photos: Vec::new(),
            received_at: Utc::now(),
        }
    }

    fn reaper(
        store: &Arc<SubmissionStore>,
        directory: &Arc<MemoryDirectory>,
    ) -> Reaper<MemoryDirectory> {
        Reaper::new(store.clone(), directory.clone(), Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_cycle_expires_overdue_session_and_purges() {
        let store = Arc::new(SubmissionStore::new());
        let directory = Arc::new(MemoryDirectory::new());
        let session = directory
            .create_session("vencido", Utc::now() - ChronoDuration::minutes(1))
            .await
            .unwrap();
        store.add(submission(session.id, "João Silva"));

        reaper(&store, &directory).run_cycle().await.unwrap();

        assert!(directory.active_sessions().await.unwrap().is_empty());
        assert!(!directory
            .session(session.id)
            .await
            .unwrap()
            .unwrap()
            .is_active);
        assert!(store.list_for_dashboard(session.id).is_empty());
    }

    #[tokio::test]
    async fn test_cycle_leaves_unexpired_session_untouched() {
        let store = Arc::new(SubmissionStore::new());
        let directory = Arc::new(MemoryDirectory::new());
        let session = directory
            .create_session("corrente", Utc::now() + ChronoDuration::hours(1))
            .await
            .unwrap();
        store.add(submission(session.id, "João Silva"));

        reaper(&store, &directory).run_cycle().await.unwrap();

        assert_eq!(directory.active_sessions().await.unwrap().len(), 1);
        assert_eq!(store.count_for_dashboard(session.id), 1);
    }

    #[tokio::test]
    async fn test_cycle_resweeps_inactive_sessions() {
        let store = Arc::new(SubmissionStore::new());
        let directory = Arc::new(MemoryDirectory::new());
        let session = directory
            .create_session("fechado manualmente", Utc::now() + ChronoDuration::hours(1))
            .await
            .unwrap();
        // deactivated by another code path, store purge skipped (crash/race)
        directory.deactivate(session.id).await.unwrap();
        store.add(submission(session.id, "João Silva"));

        reaper(&store, &directory).run_cycle().await.unwrap();

        assert!(store.list_for_dashboard(session.id).is_empty());
    }

    #[tokio::test]
    async fn test_cycle_failure_is_recoverable() {
        let store = Arc::new(SubmissionStore::new());
        let directory = Arc::new(MemoryDirectory::new());
        let session = directory
            .create_session("instável", Utc::now() - ChronoDuration::minutes(1))
            .await
            .unwrap();
        store.add(submission(session.id, "João Silva"));

        directory.set_failing(true);
        let reaper = reaper(&store, &directory);
        assert!(reaper.run_cycle().await.is_err());
        // nothing was touched while the directory was down
        assert_eq!(store.count_for_dashboard(session.id), 1);

        directory.set_failing(false);
        reaper.run_cycle().await.unwrap();
        assert!(store.list_for_dashboard(session.id).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_reaper_sweeps_and_stops() {
        let store = Arc::new(SubmissionStore::new());
        let directory = Arc::new(MemoryDirectory::new());
        let session = directory
            .create_session("vencido", Utc::now() - ChronoDuration::minutes(1))
            .await
            .unwrap();
        store.add(submission(session.id, "João Silva"));

        let handle = Reaper::new(
            store.clone(),
            directory.clone(),
            Duration::from_millis(50),
        )
        .spawn();

        // paused clock auto-advances through the interval ticks
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(store.list_for_dashboard(session.id).is_empty());
        assert!(directory.active_sessions().await.unwrap().is_empty());

        handle.stop().await;
    }
}
