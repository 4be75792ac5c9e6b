//! Upload coordination.
//!
//! This module drives the selection → classification → transfer pipeline
//! for one run. It works with any `StorageClient` implementation and
//! handles:
//!
//! - Per-pattern candidate selection (include order preserved, no
//!   cross-pattern deduplication)
//! - Directory skipping
//! - Destination key, content-type and cache-control classification
//! - Single-put vs multipart transfer by size threshold
//! - Bounded-window parallel part uploads with abort on part failure
//! - Continue-on-error across files
//!
//! Files are processed strictly one at a time; the only concurrency is
//! the part window inside a single file's multipart transfer.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt, TryStreamExt};
use objsync_common::{from_posix_path, join_key};
use objsync_filesystem::{select_pattern, ExcludeFilter};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::chunk::{generate_parts, needs_multipart, PartInfo};
use crate::content_type::content_type_for;
use crate::error::{StorageError, TransferError};
use crate::traits::StorageClient;
use crate::types::{PartETag, UploadOutcome, UploadRequest, PART_SIZE, PART_WINDOW};

/// Drives uploads for one request using any StorageClient implementation.
pub struct UploadCoordinator<'a, C: StorageClient> {
    /// The storage client for object operations.
    client: &'a C,
    /// The run's inputs.
    request: &'a UploadRequest,
}

impl<'a, C: StorageClient> UploadCoordinator<'a, C> {
    /// Create a new upload coordinator.
    ///
    /// # Arguments
    /// * `client` - Storage client for object operations
    /// * `request` - The run's inputs
    pub fn new(client: &'a C, request: &'a UploadRequest) -> Self {
        Self { client, request }
    }

    /// Upload every file selected by the request's include patterns.
    ///
    /// Include patterns are processed in order and candidates in
    /// matcher-yielded order. A single file's transfer failure is logged
    /// and recorded, and processing continues with the next file.
    ///
    /// # Returns
    /// Per-candidate outcomes, in processing order.
    ///
    /// # Errors
    /// Returns error only if a pattern fails to compile; transfer
    /// failures surface as `UploadOutcome::Failed` instead.
    pub async fn upload_all(&self) -> Result<Vec<UploadOutcome>, StorageError> {
        log::info!("Upload start");

        let excludes: ExcludeFilter = ExcludeFilter::new(&self.request.exclude)?;
        let mut outcomes: Vec<UploadOutcome> = Vec::new();

        for pattern in &self.request.include {
            let candidates: Vec<String> =
                select_pattern(&self.request.source_root, pattern, &excludes)?;

            for relative in candidates {
                outcomes.push(self.upload_candidate(&relative).await);
            }
        }

        Ok(outcomes)
    }

    /// Process one selected candidate.
    async fn upload_candidate(&self, relative: &str) -> UploadOutcome {
        let absolute: PathBuf = from_posix_path(relative, &self.request.source_root);
        let key: String = join_key(&self.request.key_prefix, relative);

        let metadata: std::fs::Metadata = match tokio::fs::metadata(&absolute).await {
            Ok(meta) => meta,
            Err(e) => {
                let error: StorageError = StorageError::IoError {
                    path: absolute.display().to_string(),
                    message: e.to_string(),
                };
                log::error!("{}", error);
                return UploadOutcome::Failed(TransferError::new(key, error));
            }
        };

        // A wildcard-only pattern may still yield a directory.
        if metadata.is_dir() {
            return UploadOutcome::SkippedDirectory {
                path: relative.to_string(),
            };
        }

        let content_type: &str = content_type_for(&absolute);
        let cache_control: Option<&str> = self.request.cache_control.resolve(&key);

        log::info!("starting to upload {}", key);
        match self
            .transfer(&absolute, &key, content_type, cache_control, metadata.len())
            .await
        {
            Ok(()) => UploadOutcome::Uploaded { key },
            Err(error) => {
                log::error!("{}", error);
                UploadOutcome::Failed(TransferError::new(key, error))
            }
        }
    }

    /// Transfer one file, single-put or multipart by size.
    async fn transfer(
        &self,
        path: &Path,
        key: &str,
        content_type: &str,
        cache_control: Option<&str>,
        size: u64,
    ) -> Result<(), StorageError> {
        if needs_multipart(size) {
            self.transfer_multipart(path, key, content_type, cache_control, size)
                .await
        } else {
            self.client
                .put_object_from_file(
                    &self.request.bucket,
                    key,
                    path,
                    Some(content_type),
                    cache_control,
                )
                .await
        }
    }

    /// Transfer one file as a multipart upload.
    ///
    /// Parts upload through a bounded window of `PART_WINDOW` in-flight
    /// requests. Any part failure aborts the upload so no orphaned parts
    /// remain.
    async fn transfer_multipart(
        &self,
        path: &Path,
        key: &str,
        content_type: &str,
        cache_control: Option<&str>,
        size: u64,
    ) -> Result<(), StorageError> {
        let bucket: &str = &self.request.bucket;
        let upload_id: String = self
            .client
            .create_multipart_upload(bucket, key, Some(content_type), cache_control)
            .await?;

        let parts: Vec<PartInfo> = generate_parts(size, PART_SIZE);
        let uploaded: Result<Vec<PartETag>, StorageError> = stream::iter(parts)
            .map(|part: PartInfo| self.upload_one_part(path, key, &upload_id, part))
            .buffer_unordered(PART_WINDOW)
            .try_collect()
            .await;

        match uploaded {
            Ok(mut etags) => {
                etags.sort_by_key(|p: &PartETag| p.part_number);
                self.client
                    .complete_multipart_upload(bucket, key, &upload_id, etags)
                    .await
            }
            Err(error) => {
                if let Err(abort_error) = self
                    .client
                    .abort_multipart_upload(bucket, key, &upload_id)
                    .await
                {
                    log::warn!(
                        "failed to abort multipart upload for {}: {}",
                        key,
                        abort_error
                    );
                }
                Err(error)
            }
        }
    }

    /// Read and upload one part.
    async fn upload_one_part(
        &self,
        path: &Path,
        key: &str,
        upload_id: &str,
        part: PartInfo,
    ) -> Result<PartETag, StorageError> {
        let data: Vec<u8> = read_file_range(path, part.offset, part.length).await?;
        let etag: String = self
            .client
            .upload_part(&self.request.bucket, key, upload_id, part.number, data)
            .await?;

        Ok(PartETag {
            part_number: part.number,
            etag,
        })
    }
}

/// Read a specific byte range from a file.
async fn read_file_range(path: &Path, offset: u64, length: u64) -> Result<Vec<u8>, StorageError> {
    let mut file: File = File::open(path).await.map_err(|e| StorageError::IoError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    file.seek(SeekFrom::Start(offset))
        .await
        .map_err(|e| StorageError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut buffer: Vec<u8> = vec![0u8; length as usize];
    file.read_exact(&mut buffer)
        .await
        .map_err(|e| StorageError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_file_range() {
        let dir: TempDir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("data.bin");
        let mut file: std::fs::File = std::fs::File::create(&path).unwrap();
        file.write_all(b"0123456789").unwrap();

        let data: Vec<u8> = read_file_range(&path, 2, 5).await.unwrap();
        assert_eq!(data, b"23456");
    }

    #[tokio::test]
    async fn test_read_file_range_past_end_is_error() {
        let dir: TempDir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("data.bin");
        std::fs::write(&path, b"short").unwrap();

        let result: Result<Vec<u8>, StorageError> = read_file_range(&path, 0, 100).await;
        assert!(matches!(result, Err(StorageError::IoError { .. })));
    }
}
