//! Bucket reclamation: paginated listing and batch delete.

use crate::error::StorageError;
use crate::traits::StorageClient;
use crate::types::{ObjectPage, LIST_PAGE_SIZE};

/// Empties a bucket page by page before an upload run.
pub struct BucketReclaimer<'a, C: StorageClient> {
    /// The storage client for listing and deletion.
    client: &'a C,
}

impl<'a, C: StorageClient> BucketReclaimer<'a, C> {
    /// Create a new reclaimer.
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Delete every object in the bucket.
    ///
    /// Lists pages of at most `LIST_PAGE_SIZE` keys and batch-deletes each
    /// page, following the continuation token until a page reports no more
    /// results. An empty first page stops immediately with zero deletions.
    ///
    /// # Returns
    /// The number of objects the service reported deleted.
    ///
    /// # Errors
    /// A listing or delete failure propagates and aborts the clear phase;
    /// unreported individual deletions are not retried.
    pub async fn clear(&self, bucket: &str) -> Result<u64, StorageError> {
        log::info!("Clearing bucket");

        let mut continuation_token: Option<String> = None;
        let mut total_deleted: u64 = 0;

        loop {
            let page: ObjectPage = self
                .client
                .list_objects(bucket, continuation_token.as_deref(), LIST_PAGE_SIZE)
                .await?;

            if page.keys.is_empty() {
                break;
            }

            let deleted: Vec<String> = self.client.delete_objects(bucket, &page.keys).await?;
            total_deleted += deleted.len() as u64;

            if !page.is_truncated {
                break;
            }
            continuation_token = page.next_continuation_token;
        }

        log::info!("Deleted {} objects from bucket {}", total_deleted, bucket);
        Ok(total_deleted)
    }
}
