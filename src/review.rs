//! Close/discard of a reviewed submission.
//!
//! Both outcomes are one logical operation: write the minimal log entry
//! first, then erase the content from the store. If the process dies between
//! the two steps, an orphaned submission is later reclaimed by the expiry
//! reaper, while a lost audit record would be gone for good.

use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::error_handling::types::ReviewError;
use crate::sessions::directory::SessionDirectory;
use crate::sessions::types::{LogStatus, MinimalLogEntry, NewLogEntry};
use crate::store::submission_store::SubmissionStore;

/// Archives the minimal log for a handled submission and erases its content.
pub async fn close_submission<D: SessionDirectory>(
    store: &SubmissionStore,
    directory: &D,
    submission_id: Uuid,
) -> Result<MinimalLogEntry, ReviewError> {
    finish_submission(store, directory, submission_id, LogStatus::Closed).await
}

/// Like [`close_submission`], but records the report as discarded.
pub async fn discard_submission<D: SessionDirectory>(
    store: &SubmissionStore,
    directory: &D,
    submission_id: Uuid,
) -> Result<MinimalLogEntry, ReviewError> {
    finish_submission(store, directory, submission_id, LogStatus::Discarded).await
}

async fn finish_submission<D: SessionDirectory>(
    store: &SubmissionStore,
    directory: &D,
    submission_id: Uuid,
    status: LogStatus,
) -> Result<MinimalLogEntry, ReviewError> {
    let submission = store
        .get(submission_id)
        .ok_or(ReviewError::SubmissionNotFound)?;

    let log = directory
        .record_log(NewLogEntry {
            dashboard_id: submission.dashboard_id,
            guest_display_name: submission.guest_name.clone(),
            crime_type: submission.crime_type.clone(),
            received_at: submission.received_at,
            closed_at: Utc::now(),
            status,
        })
        .await?;

    // content goes only after the audit record exists
    store.delete(submission_id);
    info!(
        "Submission {} {} on dashboard {}",
        submission_id,
        status.as_str(),
        submission.dashboard_id
    );
    Ok(log)
}
