use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-boxed intake shift opened by an officer.
///
/// The directory backend is the authority on lifecycle state; this crate is
/// the authority on what submissions exist for a live dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSession {
    pub id: i32,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
}

impl DashboardSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Outcome recorded when an officer finishes reviewing a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStatus {
    Closed,
    Discarded,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Closed => "closed",
            LogStatus::Discarded => "discarded",
        }
    }

    pub fn from_str(s: &str) -> LogStatus {
        match s {
            "closed" => LogStatus::Closed,
            _ => LogStatus::Discarded,
        }
    }
}

/// Minimal log entry to record, before it has a database id.
///
/// Deliberately low-detail: a display name and crime type only, never the
/// report content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLogEntry {
    pub dashboard_id: i32,
    pub guest_display_name: String,
    pub crime_type: String,
    pub received_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub status: LogStatus,
}

/// The durable audit record kept after a submission is closed or discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimalLogEntry {
    pub id: i32,
    pub dashboard_id: i32,
    pub guest_display_name: String,
    pub crime_type: String,
    pub received_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub status: LogStatus,
}
