//! Shared data structures for storage operations.

use std::path::PathBuf;

use crate::cache_control::CacheControlRules;
use crate::error::{StorageError, TransferError};

/// Part size for multipart transfers (5MB).
/// The last part may be smaller.
pub const PART_SIZE: u64 = 5 * 1024 * 1024;

/// Files larger than this are transferred as multipart uploads; files at
/// or below it are sent with a single put.
pub const MULTIPART_THRESHOLD: u64 = PART_SIZE;

/// Maximum number of parts in flight during one multipart transfer.
pub const PART_WINDOW: usize = 4;

/// Maximum keys requested per bucket listing page.
pub const LIST_PAGE_SIZE: i32 = 1000;

/// One synchronization run's inputs. Built once and read-only thereafter.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Destination bucket name.
    pub bucket: String,
    /// Local source root; include patterns are resolved against it.
    pub source_root: PathBuf,
    /// Prefix prepended to every destination key (may be empty).
    pub key_prefix: String,
    /// Include patterns, in order.
    pub include: Vec<String>,
    /// Exclude patterns, in order.
    pub exclude: Vec<String>,
    /// Cache-control rule table.
    pub cache_control: CacheControlRules,
}

impl UploadRequest {
    /// Check that required inputs are present.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the bucket or source root is missing.
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.bucket.is_empty() {
            return Err(StorageError::InvalidConfig {
                message: "bucket is required".to_string(),
            });
        }
        if self.source_root.as_os_str().is_empty() {
            return Err(StorageError::InvalidConfig {
                message: "source root is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Result of processing one selected candidate.
#[derive(Debug)]
pub enum UploadOutcome {
    /// The file was transferred.
    Uploaded {
        /// Destination key.
        key: String,
    },
    /// The candidate was a directory and was skipped.
    SkippedDirectory {
        /// Root-relative path of the directory.
        path: String,
    },
    /// The transfer failed; processing continued with the next file.
    Failed(TransferError),
}

impl UploadOutcome {
    /// Whether this outcome is a transfer failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, UploadOutcome::Failed(_))
    }
}

/// One page of a bucket listing.
#[derive(Debug, Clone)]
pub struct ObjectPage {
    /// Object keys on this page.
    pub keys: Vec<String>,
    /// Cursor for the next page, when present.
    pub next_continuation_token: Option<String>,
    /// Whether more pages follow.
    pub is_truncated: bool,
}

/// ETag of a completed multipart part.
#[derive(Debug, Clone)]
pub struct PartETag {
    /// 1-based part number.
    pub part_number: i32,
    /// ETag returned by the storage service.
    pub etag: String,
}

/// Aggregate result of one synchronization run.
#[derive(Debug)]
pub struct SyncSummary {
    /// Objects removed by the clear phase (0 when clearing was not
    /// requested).
    pub objects_deleted: u64,
    /// Per-candidate outcomes, in processing order.
    pub outcomes: Vec<UploadOutcome>,
}

impl SyncSummary {
    /// Number of files transferred.
    pub fn uploaded_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, UploadOutcome::Uploaded { .. }))
            .count()
    }

    /// Number of files that failed to transfer.
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Whether any file failed to transfer. Failures never fail the run by
    /// themselves; callers that want a hard failure check this.
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UploadRequest {
        UploadRequest {
            bucket: "bucket".to_string(),
            source_root: PathBuf::from("/site"),
            key_prefix: String::new(),
            include: vec![],
            exclude: vec![],
            cache_control: CacheControlRules::default(),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_bucket() {
        let mut req: UploadRequest = request();
        req.bucket = String::new();
        assert!(matches!(
            req.validate(),
            Err(StorageError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_missing_root() {
        let mut req: UploadRequest = request();
        req.source_root = PathBuf::new();
        assert!(matches!(
            req.validate(),
            Err(StorageError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_summary_counts() {
        let summary: SyncSummary = SyncSummary {
            objects_deleted: 3,
            outcomes: vec![
                UploadOutcome::Uploaded {
                    key: "a".to_string(),
                },
                UploadOutcome::SkippedDirectory {
                    path: "dir".to_string(),
                },
                UploadOutcome::Failed(TransferError::new(
                    "b",
                    StorageError::Other {
                        message: "boom".to_string(),
                    },
                )),
            ],
        };

        assert_eq!(summary.uploaded_count(), 1);
        assert_eq!(summary.failed_count(), 1);
        assert!(summary.has_failures());
    }
}
