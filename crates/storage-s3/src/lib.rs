//! aws-sdk-s3 backend for objsync.
//!
//! This crate provides a `StorageClient` implementation against an
//! S3-compatible object-storage endpoint, plus credential-source
//! resolution into the `TokenProvider` the client authenticates through.
//!
//! # Example
//!
//! ```ignore
//! use objsync_storage_s3::{CredentialSource, ObjectStorageClient, S3ClientSettings};
//!
//! let provider = CredentialSource::StaticToken { token }.resolve();
//! let client = ObjectStorageClient::new(S3ClientSettings::default(), provider).await?;
//! ```

mod client;
mod token;

pub use client::{ObjectStorageClient, S3ClientSettings, DEFAULT_ENDPOINT, DEFAULT_REGION};
pub use token::{
    CredentialSource, IamJwtTokenProvider, ServiceAccountKey, StaticTokenProvider,
    TokenExchangeProvider,
};
