//! Bearer-credential capability used by storage backends.
//!
//! Backends attach the token to every outgoing call; how the token is
//! obtained and refreshed is opaque to the coordinator and reclaimer.

use async_trait::async_trait;

use crate::error::StorageError;

/// Supplies the bearer credential attached to storage requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a currently valid bearer token.
    async fn bearer_token(&self) -> Result<String, StorageError>;
}
