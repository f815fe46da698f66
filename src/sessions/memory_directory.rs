use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::error_handling::types::DirectoryError;
use crate::sessions::directory::SessionDirectory;
use crate::sessions::types::{DashboardSession, MinimalLogEntry, NewLogEntry};

/// In-memory session directory.
///
/// Backs the test suite and embedders that manage session state themselves.
/// `set_failing` makes every operation return an error, to exercise the
/// reaper's failure path.
pub struct MemoryDirectory {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_session_id: i32,
    next_log_id: i32,
    sessions: HashMap<i32, DashboardSession>,
    logs: Vec<MinimalLogEntry>,
    failing: bool,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// When set, every directory operation fails with the given error kind
    /// until cleared.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self, inner: &Inner, error: DirectoryError) -> Result<(), DirectoryError> {
        if inner.failing {
            Err(error)
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionDirectory for MemoryDirectory {
    async fn create_session(
        &self,
        label: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<DashboardSession, DirectoryError> {
        let mut inner = self.lock();
        self.check(&inner, DirectoryError::WriteFailed)?;
        inner.next_session_id += 1;
        let session = DashboardSession {
            id: inner.next_session_id,
            label: label.to_string(),
            created_at: Utc::now(),
            expires_at,
            is_active: true,
        };
        inner.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn session(&self, id: i32) -> Result<Option<DashboardSession>, DirectoryError> {
        let inner = self.lock();
        self.check(&inner, DirectoryError::ReadFailed)?;
        Ok(inner.sessions.get(&id).cloned())
    }

    async fn active_sessions(&self) -> Result<Vec<DashboardSession>, DirectoryError> {
        let inner = self.lock();
        self.check(&inner, DirectoryError::ReadFailed)?;
        let mut sessions: Vec<_> = inner
            .sessions
            .values()
            .filter(|s| s.is_active)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.id);
        Ok(sessions)
    }

    async fn inactive_sessions(&self) -> Result<Vec<DashboardSession>, DirectoryError> {
        let inner = self.lock();
        self.check(&inner, DirectoryError::ReadFailed)?;
        let mut sessions: Vec<_> = inner
            .sessions
            .values()
            .filter(|s| !s.is_active)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.id);
        Ok(sessions)
    }

    async fn deactivate(&self, id: i32) -> Result<(), DirectoryError> {
        let mut inner = self.lock();
        self.check(&inner, DirectoryError::WriteFailed)?;
        if let Some(session) = inner.sessions.get_mut(&id) {
            session.is_active = false;
        }
        Ok(())
    }

    async fn record_log(&self, entry: NewLogEntry) -> Result<MinimalLogEntry, DirectoryError> {
        let mut inner = self.lock();
        self.check(&inner, DirectoryError::WriteFailed)?;
        inner.next_log_id += 1;
        let log = MinimalLogEntry {
            id: inner.next_log_id,
            dashboard_id: entry.dashboard_id,
            guest_display_name: entry.guest_display_name,
            crime_type: entry.crime_type,
            received_at: entry.received_at,
            closed_at: entry.closed_at,
            status: entry.status,
        };
        inner.logs.push(log.clone());
        Ok(log)
    }

    async fn logs_for_dashboard(
        &self,
        dashboard_id: i32,
    ) -> Result<Vec<MinimalLogEntry>, DirectoryError> {
        let inner = self.lock();
        self.check(&inner, DirectoryError::ReadFailed)?;
        let mut logs: Vec<_> = inner
            .logs
            .iter()
            .filter(|l| l.dashboard_id == dashboard_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.received_at.cmp(&a.received_at));
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let directory = MemoryDirectory::new();
        let session = directory
            .create_session("plantão", Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(directory.active_sessions().await.unwrap().len(), 1);
        directory.deactivate(session.id).await.unwrap();
        assert!(directory.active_sessions().await.unwrap().is_empty());
        assert_eq!(directory.inactive_sessions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_mode_surfaces_errors() {
        let directory = MemoryDirectory::new();
        directory.set_failing(true);
        assert!(directory.active_sessions().await.is_err());
        assert!(directory
            .create_session("x", Utc::now())
            .await
            .is_err());

        directory.set_failing(false);
        assert!(directory.active_sessions().await.is_ok());
    }
}
