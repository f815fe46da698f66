//! Dashboard-session subsystem.
//!
//! Dashboard sessions (one time-boxed intake shift each) are persisted
//! externally; this crate only reads their lifecycle state and flips them
//! inactive on expiry. Minimal log entries are the durable low-detail audit
//! records kept after a submission is closed or discarded.
//!
//! Components:
//! - `types`: `DashboardSession` and minimal-log records.
//! - `directory`: the `SessionDirectory` trait defining a uniform API.
//! - `entities`: SeaORM entity models for the database backend.
//! - `sqlite_directory`: SeaORM-based SQLite implementation.
//! - `memory_directory`: in-memory implementation for tests and embedders.
//! - `expiry`: the session-expiry reaper.

pub mod directory;
pub mod entities;
pub mod expiry;
pub mod memory_directory;
pub mod sqlite_directory;
pub mod types;

pub use directory::SessionDirectory;
pub use expiry::{Reaper, ReaperHandle};
pub use memory_directory::MemoryDirectory;
pub use sqlite_directory::SqliteDirectory;
pub use types::{DashboardSession, LogStatus, MinimalLogEntry, NewLogEntry};
