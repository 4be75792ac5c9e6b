//! Run orchestration: validate, optionally clear, then upload.

use crate::error::StorageError;
use crate::reclaim::BucketReclaimer;
use crate::traits::StorageClient;
use crate::types::{SyncSummary, UploadOutcome, UploadRequest};
use crate::upload::UploadCoordinator;

/// Execute one synchronization run.
///
/// Configuration is validated before any transfer or clear begins. When
/// `clear` is set the bucket is emptied first; the upload phase then
/// processes every include pattern. Per-file transfer failures are
/// recorded in the summary and never fail the run by themselves.
///
/// # Arguments
/// * `client` - Storage client shared by both phases
/// * `request` - The run's inputs
/// * `clear` - Whether to empty the bucket before uploading
///
/// # Errors
/// Returns error on invalid configuration, pattern compile failures, or a
/// clear-phase listing/delete failure.
pub async fn run_sync<C: StorageClient>(
    client: &C,
    request: &UploadRequest,
    clear: bool,
) -> Result<SyncSummary, StorageError> {
    request.validate()?;

    let objects_deleted: u64 = if clear {
        BucketReclaimer::new(client).clear(&request.bucket).await?
    } else {
        0
    };

    let outcomes: Vec<UploadOutcome> =
        UploadCoordinator::new(client, request).upload_all().await?;

    Ok(SyncSummary {
        objects_deleted,
        outcomes,
    })
}
