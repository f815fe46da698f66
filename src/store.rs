//! Submission store subsystem.
//!
//! Submissions live only in volatile memory for the lifetime of their
//! owning dashboard session; nothing in this module ever touches durable
//! storage.
//!
//! Components:
//! - `types`: the `Submission` value and its tagged answer values.
//! - `submission_store`: the concurrent in-memory repository with
//!   dashboard-scoped listing, purge and duplicate detection.

pub mod submission_store;
pub mod types;

pub use submission_store::SubmissionStore;
pub use types::{Answer, Submission};
