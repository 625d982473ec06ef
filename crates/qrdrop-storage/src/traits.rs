//! Storage abstraction trait
//!
//! This module defines the Storage trait that the upload pipeline depends on.

use async_trait::async_trait;
use bytes::Bytes;
use qrdrop_core::AppError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => AppError::Config(msg),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

/// Object created in the remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Opaque identifier assigned by the backend
    pub id: String,
    /// Name the backend recorded for the object
    pub name: String,
}

/// Storage abstraction trait
///
/// The handler only needs to create files, so that is the whole surface. Tests swap in
/// a recording implementation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create a file named `name` inside `parent_folder_id`.
    ///
    /// The payload is sent in one request; a failure leaves nothing behind from the
    /// caller's point of view.
    async fn create_file(
        &self,
        name: &str,
        mime_type: &str,
        data: Bytes,
        parent_folder_id: &str,
    ) -> StorageResult<StoredObject>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
