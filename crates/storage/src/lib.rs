//! Backend-agnostic core of objsync.
//!
//! This crate coordinates the selection → classification → transfer
//! pipeline against any `StorageClient` implementation:
//!
//! - **UploadCoordinator** - per-file key, content-type and cache-control
//!   classification plus single-put/multipart transfer
//! - **BucketReclaimer** - paginated bucket clearing before upload
//! - **CacheControlRules** - ordered pattern→value header assignment
//! - **TokenProvider** - the bearer-credential seam backends authenticate
//!   through; credential origin is opaque here
//!
//! The wire protocol itself is a black box behind the `StorageClient`
//! trait; see the backend crates for concrete implementations.

mod auth;
mod cache_control;
mod chunk;
mod content_type;
mod error;
mod reclaim;
mod sync;
mod traits;
mod types;
mod upload;

pub use auth::TokenProvider;
pub use cache_control::CacheControlRules;
pub use chunk::{expected_part_count, generate_parts, needs_multipart, PartInfo};
pub use content_type::{content_type_for, DEFAULT_CONTENT_TYPE};
pub use error::{StorageError, TransferError};
pub use reclaim::BucketReclaimer;
pub use sync::run_sync;
pub use traits::StorageClient;
pub use types::{
    ObjectPage, PartETag, SyncSummary, UploadOutcome, UploadRequest, LIST_PAGE_SIZE,
    MULTIPART_THRESHOLD, PART_SIZE, PART_WINDOW,
};
pub use upload::UploadCoordinator;
