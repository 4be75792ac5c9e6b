//! AWS SDK S3 client implementation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart, Delete, ObjectIdentifier};
use aws_sdk_s3::Client as S3Client;
use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::interceptors::context::BeforeTransmitInterceptorContextMut;
use aws_smithy_runtime_api::client::interceptors::Intercept;
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_types::config_bag::ConfigBag;

use objsync_storage::{ObjectPage, PartETag, StorageClient, StorageError, TokenProvider};

/// Default S3-compatible endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://storage.yandexcloud.net";

/// Default region for the endpoint above.
pub const DEFAULT_REGION: &str = "ru-central1";

/// Header carrying the bearer credential on every request.
const SUBJECT_TOKEN_HEADER: &str = "X-YaCloud-SubjectToken";

/// Connection settings for the S3 backend.
#[derive(Debug, Clone)]
pub struct S3ClientSettings {
    /// Service endpoint URL.
    pub endpoint: String,
    /// Region name.
    pub region: String,
}

impl Default for S3ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

/// Attaches the subject token to every outgoing request.
///
/// Registered once at client construction and never mutated afterward;
/// the request pipeline itself is left untouched.
struct SubjectTokenInterceptor {
    token: String,
}

impl std::fmt::Debug for SubjectTokenInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token is a secret; never print it.
        f.debug_struct("SubjectTokenInterceptor").finish_non_exhaustive()
    }
}

impl Intercept for SubjectTokenInterceptor {
    fn name(&self) -> &'static str {
        "SubjectTokenInterceptor"
    }

    fn modify_before_signing(
        &self,
        context: &mut BeforeTransmitInterceptorContextMut<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        context
            .request_mut()
            .headers_mut()
            .try_insert(SUBJECT_TOKEN_HEADER, self.token.clone())?;
        Ok(())
    }
}

/// StorageClient implementation using the AWS SDK for Rust.
///
/// Authentication is bearer-token based: the token is resolved from the
/// supplied provider at construction and attached to every call by a
/// fixed interceptor. The SigV4 signer runs with placeholder credentials;
/// the service authenticates the subject token header.
pub struct ObjectStorageClient {
    /// The underlying S3 client.
    s3_client: S3Client,
}

impl ObjectStorageClient {
    /// Create a new client against the configured endpoint.
    ///
    /// # Arguments
    /// * `settings` - Endpoint and region settings
    /// * `token_provider` - Source of the bearer credential
    ///
    /// # Errors
    /// Returns error if the bearer token cannot be resolved.
    pub async fn new(
        settings: S3ClientSettings,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Result<Self, StorageError> {
        let token: String = token_provider.bearer_token().await?;

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(settings.region.clone()))
            .endpoint_url(settings.endpoint.clone())
            .credentials_provider(Credentials::new(
                "subject-token",
                "subject-token",
                None,
                None,
                "objsync",
            ))
            .load()
            .await;

        let config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .interceptor(SubjectTokenInterceptor { token })
            .build();

        Ok(Self {
            s3_client: S3Client::from_conf(config),
        })
    }

    /// Create a client from an existing S3Client (for testing).
    ///
    /// # Arguments
    /// * `s3_client` - Pre-configured S3 client
    pub fn from_client(s3_client: S3Client) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl StorageClient for ObjectStorageClient {
    async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
        content_type: Option<&str>,
        cache_control: Option<&str>,
    ) -> Result<(), StorageError> {
        let body: ByteStream =
            ByteStream::from_path(file_path)
                .await
                .map_err(|e| StorageError::IoError {
                    path: file_path.display().to_string(),
                    message: e.to_string(),
                })?;

        let mut request = self
            .s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        if let Some(cc) = cache_control {
            request = request.cache_control(cc);
        }

        request
            .send()
            .await
            .map_err(|err| StorageError::NetworkError {
                message: err.to_string(),
                retryable: true,
            })?;

        Ok(())
    }

    async fn create_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        cache_control: Option<&str>,
    ) -> Result<String, StorageError> {
        let mut request = self
            .s3_client
            .create_multipart_upload()
            .bucket(bucket)
            .key(key);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        if let Some(cc) = cache_control {
            request = request.cache_control(cc);
        }

        let output = request
            .send()
            .await
            .map_err(|err| StorageError::NetworkError {
                message: err.to_string(),
                retryable: true,
            })?;

        output
            .upload_id()
            .map(str::to_string)
            .ok_or_else(|| StorageError::Other {
                message: format!("create_multipart_upload returned no upload id for {}", key),
            })
    }

    async fn upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        data: Vec<u8>,
    ) -> Result<String, StorageError> {
        let output = self
            .s3_client
            .upload_part()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .part_number(part_number)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|err| StorageError::NetworkError {
                message: err.to_string(),
                retryable: true,
            })?;

        output
            .e_tag()
            .map(str::to_string)
            .ok_or_else(|| StorageError::Other {
                message: format!("upload_part returned no ETag for {} part {}", key, part_number),
            })
    }

    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: Vec<PartETag>,
    ) -> Result<(), StorageError> {
        let completed: Vec<CompletedPart> = parts
            .into_iter()
            .map(|p: PartETag| {
                CompletedPart::builder()
                    .part_number(p.part_number)
                    .e_tag(p.etag)
                    .build()
            })
            .collect();

        let upload: CompletedMultipartUpload = CompletedMultipartUpload::builder()
            .set_parts(Some(completed))
            .build();

        self.s3_client
            .complete_multipart_upload()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .multipart_upload(upload)
            .send()
            .await
            .map_err(|err| StorageError::NetworkError {
                message: err.to_string(),
                retryable: true,
            })?;

        Ok(())
    }

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<(), StorageError> {
        self.s3_client
            .abort_multipart_upload()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .send()
            .await
            .map_err(|err| StorageError::NetworkError {
                message: err.to_string(),
                retryable: true,
            })?;

        Ok(())
    }

    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
        max_keys: i32,
    ) -> Result<ObjectPage, StorageError> {
        let mut request = self
            .s3_client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(max_keys);

        if let Some(token) = continuation_token {
            request = request.continuation_token(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| StorageError::NetworkError {
                message: err.to_string(),
                retryable: true,
            })?;

        let keys: Vec<String> = response
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(String::from))
            .collect();

        Ok(ObjectPage {
            keys,
            next_continuation_token: response.next_continuation_token().map(String::from),
            is_truncated: response.is_truncated() == Some(true),
        })
    }

    async fn delete_objects(
        &self,
        bucket: &str,
        keys: &[String],
    ) -> Result<Vec<String>, StorageError> {
        let objects: Vec<ObjectIdentifier> = keys
            .iter()
            .map(|key: &String| {
                ObjectIdentifier::builder()
                    .key(key)
                    .build()
                    .map_err(|e| StorageError::Other {
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<ObjectIdentifier>, StorageError>>()?;

        let delete: Delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| StorageError::Other {
                message: e.to_string(),
            })?;

        let response = self
            .s3_client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|err| StorageError::NetworkError {
                message: err.to_string(),
                retryable: true,
            })?;

        Ok(response
            .deleted()
            .iter()
            .filter_map(|d| d.key().map(String::from))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_implements_storage_client() {
        fn assert_storage_client<T: StorageClient>() {}
        assert_storage_client::<ObjectStorageClient>();
    }

    #[test]
    fn test_default_settings() {
        let settings: S3ClientSettings = S3ClientSettings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.region, DEFAULT_REGION);
    }

    #[test]
    fn test_interceptor_debug_redacts_token() {
        let interceptor: SubjectTokenInterceptor = SubjectTokenInterceptor {
            token: "secret-token".to_string(),
        };
        let printed: String = format!("{:?}", interceptor);
        assert!(!printed.contains("secret-token"));
    }
}
