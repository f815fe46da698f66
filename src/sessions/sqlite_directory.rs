use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::{error, info};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, Database,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::error_handling::types::DirectoryError;
use crate::sessions::directory::SessionDirectory;
use crate::sessions::entities::{dashboard_sessions, minimal_log_entries};
use crate::sessions::types::{DashboardSession, LogStatus, MinimalLogEntry, NewLogEntry};

/// SeaORM-backed session directory over a SQLite file.
///
/// Owns the `dashboard_sessions` and `minimal_log_entries` tables. Note the
/// sensitive submission content never reaches this database; only lifecycle
/// state and minimal log records do.
pub struct SqliteDirectory {
    db: DatabaseConnection,
}

impl SqliteDirectory {
    /// Opens (creating if missing) the database file and ensures the schema.
    pub async fn connect<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let url = format!("sqlite://{}?mode=rwc", path.as_ref().display());
        let db = Database::connect(url.as_str()).await.map_err(|e| {
            error!("Failed to open session directory {}: {}", url, e);
            DirectoryError::ConnectionFailed
        })?;
        db.execute_unprepared(
            "CREATE TABLE IF NOT EXISTS dashboard_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                label TEXT NOT NULL,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1
            );",
        )
        .await
        .map_err(|e| {
            error!("Failed to create dashboard_sessions table: {}", e);
            DirectoryError::WriteFailed
        })?;
        db.execute_unprepared(
            "CREATE TABLE IF NOT EXISTS minimal_log_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dashboard_id INTEGER NOT NULL,
                guest_display_name TEXT NOT NULL,
                crime_type TEXT NOT NULL,
                received_at TEXT NOT NULL,
                closed_at TEXT NOT NULL,
                status TEXT NOT NULL
            );",
        )
        .await
        .map_err(|e| {
            error!("Failed to create minimal_log_entries table: {}", e);
            DirectoryError::WriteFailed
        })?;
        info!("Session directory ready at {}", path.as_ref().display());
        Ok(Self { db })
    }

    async fn sessions_where(
        &self,
        active: bool,
    ) -> Result<Vec<DashboardSession>, DirectoryError> {
        let models = dashboard_sessions::Entity::find()
            .filter(dashboard_sessions::Column::IsActive.eq(active))
            .order_by_asc(dashboard_sessions::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to query dashboard sessions: {}", e);
                DirectoryError::ReadFailed
            })?;
        models.into_iter().map(into_session).collect()
    }
}

impl SessionDirectory for SqliteDirectory {
    async fn create_session(
        &self,
        label: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<DashboardSession, DirectoryError> {
        let model = dashboard_sessions::ActiveModel {
            label: Set(label.to_string()),
            created_at: Set(Utc::now().to_rfc3339()),
            expires_at: Set(expires_at.to_rfc3339()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to create dashboard session: {}", e);
            DirectoryError::WriteFailed
        })?;
        info!("Created dashboard session {} ({:?})", model.id, model.label);
        into_session(model)
    }

    async fn session(&self, id: i32) -> Result<Option<DashboardSession>, DirectoryError> {
        let model = dashboard_sessions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load dashboard session {}: {}", id, e);
                DirectoryError::ReadFailed
            })?;
        model.map(into_session).transpose()
    }

    async fn active_sessions(&self) -> Result<Vec<DashboardSession>, DirectoryError> {
        self.sessions_where(true).await
    }

    async fn inactive_sessions(&self) -> Result<Vec<DashboardSession>, DirectoryError> {
        self.sessions_where(false).await
    }

    async fn deactivate(&self, id: i32) -> Result<(), DirectoryError> {
        dashboard_sessions::Entity::update_many()
            .col_expr(dashboard_sessions::Column::IsActive, Expr::value(false))
            .filter(dashboard_sessions::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to deactivate dashboard session {}: {}", id, e);
                DirectoryError::WriteFailed
            })?;
        Ok(())
    }

    async fn record_log(&self, entry: NewLogEntry) -> Result<MinimalLogEntry, DirectoryError> {
        let model = minimal_log_entries::ActiveModel {
            dashboard_id: Set(entry.dashboard_id),
            guest_display_name: Set(entry.guest_display_name),
            crime_type: Set(entry.crime_type),
            received_at: Set(entry.received_at.to_rfc3339()),
            closed_at: Set(entry.closed_at.to_rfc3339()),
            status: Set(entry.status.as_str().to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            error!("Failed to record minimal log entry: {}", e);
            DirectoryError::WriteFailed
        })?;
        into_log(model)
    }

    async fn logs_for_dashboard(
        &self,
        dashboard_id: i32,
    ) -> Result<Vec<MinimalLogEntry>, DirectoryError> {
        let models = minimal_log_entries::Entity::find()
            .filter(minimal_log_entries::Column::DashboardId.eq(dashboard_id))
            .order_by_desc(minimal_log_entries::Column::ReceivedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to query log entries for dashboard {}: {}", dashboard_id, e);
                DirectoryError::ReadFailed
            })?;
        models.into_iter().map(into_log).collect()
    }
}

fn into_session(model: dashboard_sessions::Model) -> Result<DashboardSession, DirectoryError> {
    Ok(DashboardSession {
        id: model.id,
        label: model.label,
        created_at: parse_stored_timestamp(&model.created_at)?,
        expires_at: parse_stored_timestamp(&model.expires_at)?,
        is_active: model.is_active,
    })
}

fn into_log(model: minimal_log_entries::Model) -> Result<MinimalLogEntry, DirectoryError> {
    Ok(MinimalLogEntry {
        id: model.id,
        dashboard_id: model.dashboard_id,
        guest_display_name: model.guest_display_name,
        crime_type: model.crime_type,
        received_at: parse_stored_timestamp(&model.received_at)?,
        closed_at: parse_stored_timestamp(&model.closed_at)?,
        status: LogStatus::from_str(&model.status),
    })
}

/// Parses a stored timestamp. Naive values (no offset, as written by older
/// tooling) are taken as already being in UTC before comparison.
fn parse_stored_timestamp(raw: &str) -> Result<DateTime<Utc>, DirectoryError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            error!("Invalid stored timestamp {:?}: {}", raw, e);
            DirectoryError::ReadFailed
        })
}
