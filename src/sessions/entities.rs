//! SeaORM entity models used by the SQLite session directory.
//!
//! These structs map to the tables created by `sqlite_directory`:
//! - `dashboard_sessions` — session lifecycle and expiry state
//! - `minimal_log_entries` — low-detail audit records per dashboard
//!
//! Timestamps are stored as RFC3339 strings for portability.

/// Dashboard sessions table entity models.
pub mod dashboard_sessions {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "dashboard_sessions")]
    pub struct Model {
        /// Auto-increment row id
        #[sea_orm(primary_key)]
        pub id: i32,
        /// Officer-facing shift label
        pub label: String,
        /// RFC3339 creation timestamp
        pub created_at: String,
        /// RFC3339 expiry timestamp
        pub expires_at: String,
        /// Lifecycle flag; flipped by close or expiry, never back
        pub is_active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Minimal log entries table entity models.
pub mod minimal_log_entries {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "minimal_log_entries")]
    pub struct Model {
        /// Auto-increment row id
        #[sea_orm(primary_key)]
        pub id: i32,
        /// Owning dashboard session id
        pub dashboard_id: i32,
        /// Guest name exactly as displayed to the officer
        pub guest_display_name: String,
        /// Crime type tag of the handled submission
        pub crime_type: String,
        /// RFC3339 timestamp the submission was received
        pub received_at: String,
        /// RFC3339 timestamp the review was finished
        pub closed_at: String,
        /// "closed" or "discarded"
        pub status: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
