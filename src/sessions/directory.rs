use std::future::Future;

use chrono::{DateTime, Utc};

use crate::error_handling::types::DirectoryError;
use crate::sessions::types::{DashboardSession, MinimalLogEntry, NewLogEntry};

/// Uniform API over the externally persisted dashboard-session state.
///
/// Futures are `Send` so consumers (the expiry reaper in particular) can run
/// on a multi-threaded runtime.
pub trait SessionDirectory: Send + Sync + 'static {
    /// Opens a new active session expiring at `expires_at`.
    fn create_session(
        &self,
        label: &str,
        expires_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<DashboardSession, DirectoryError>> + Send;

    /// Point lookup; `Ok(None)` for unknown ids.
    fn session(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<Option<DashboardSession>, DirectoryError>> + Send;

    fn active_sessions(
        &self,
    ) -> impl Future<Output = Result<Vec<DashboardSession>, DirectoryError>> + Send;

    fn inactive_sessions(
        &self,
    ) -> impl Future<Output = Result<Vec<DashboardSession>, DirectoryError>> + Send;

    /// Flips a session inactive. Idempotent.
    fn deactivate(&self, id: i32) -> impl Future<Output = Result<(), DirectoryError>> + Send;

    /// Durably records a minimal log entry and returns it with its id.
    fn record_log(
        &self,
        entry: NewLogEntry,
    ) -> impl Future<Output = Result<MinimalLogEntry, DirectoryError>> + Send;

    /// Log entries for one dashboard, most recent first.
    fn logs_for_dashboard(
        &self,
        dashboard_id: i32,
    ) -> impl Future<Output = Result<Vec<MinimalLogEntry>, DirectoryError>> + Send;
}
