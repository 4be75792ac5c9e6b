//! Storage traits/interfaces for object-storage operations.

use std::path::Path;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{ObjectPage, PartETag};

/// Low-level object-storage operations - implemented by each backend.
///
/// The wire protocol is a black box behind this trait: key/bucket
/// addressing and standard content headers only. The chunked-upload
/// decision and the part window live above it, in the coordinator.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Upload a whole file as a single object.
    async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
        content_type: Option<&str>,
        cache_control: Option<&str>,
    ) -> Result<(), StorageError>;

    /// Start a multipart upload and return its upload id.
    async fn create_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        cache_control: Option<&str>,
    ) -> Result<String, StorageError>;

    /// Upload one part and return its ETag.
    async fn upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        data: Vec<u8>,
    ) -> Result<String, StorageError>;

    /// Finalize a multipart upload from its completed parts.
    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: Vec<PartETag>,
    ) -> Result<(), StorageError>;

    /// Abort a multipart upload, removing already-uploaded parts.
    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<(), StorageError>;

    /// Fetch one listing page of at most `max_keys` keys.
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
        max_keys: i32,
    ) -> Result<ObjectPage, StorageError>;

    /// Batch-delete keys, returning those the service reports deleted.
    async fn delete_objects(
        &self,
        bucket: &str,
        keys: &[String],
    ) -> Result<Vec<String>, StorageError>;
}
