//! Upload pipeline
//!
//! The pipeline runs in a fixed order: method check → token check → multipart
//! extraction → name derivation → storage. [`UploadGate`] covers the first two steps and
//! needs nothing but the expected token, so the serverless function can reject a request
//! before loading the rest of its configuration.

use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, HeaderMap, Method};
use bytes::Bytes;
use futures::Stream;
use qrdrop_core::{stored_object_name_now, AppError, Config};
use qrdrop_storage::Storage;
use serde::Serialize;
use subtle::ConstantTimeEq;

/// Header carrying the shared upload secret.
pub const UPLOAD_TOKEN_HEADER: &str = "x-upload-token";

/// Method and shared-secret admission check.
#[derive(Clone, Default)]
pub struct UploadGate {
    expected_token: Option<String>,
}

impl std::fmt::Debug for UploadGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadGate")
            .field("token_required", &self.expected_token.is_some())
            .finish()
    }
}

impl UploadGate {
    /// `None` (or an empty token) leaves the endpoint open to any POST.
    pub fn new(expected_token: Option<String>) -> Self {
        Self {
            expected_token: expected_token.filter(|token| !token.is_empty()),
        }
    }

    pub fn token_required(&self) -> bool {
        self.expected_token.is_some()
    }

    /// Reject anything but POST, then enforce the upload token when one is configured.
    pub fn admit(&self, method: &Method, headers: &HeaderMap) -> Result<(), AppError> {
        if method != Method::POST {
            return Err(AppError::MethodNotAllowed);
        }

        if let Some(expected) = &self.expected_token {
            let presented = headers
                .get(UPLOAD_TOKEN_HEADER)
                .map(|value| value.as_bytes())
                .unwrap_or_default();
            if !bool::from(presented.ct_eq(expected.as_bytes())) {
                return Err(AppError::Unauthorized);
            }
        }

        Ok(())
    }
}

/// Outcome of a stored upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Name the file was stored under (`{qrId}_{epochMillis}_{fileName}`)
    pub filename: String,
    /// Identifier the storage backend assigned
    pub file_id: String,
}

/// Success body returned to the client
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub ok: bool,
    pub filename: String,
}

impl From<&UploadReceipt> for UploadResponse {
    fn from(receipt: &UploadReceipt) -> Self {
        Self {
            ok: true,
            filename: receipt.filename.clone(),
        }
    }
}

/// Upload service: admission, extraction, naming and storage.
#[derive(Clone)]
pub struct UploadService {
    gate: UploadGate,
    storage: Arc<dyn Storage>,
    folder_id: String,
    max_upload_size_bytes: usize,
}

impl UploadService {
    pub fn new(
        gate: UploadGate,
        storage: Arc<dyn Storage>,
        folder_id: impl Into<String>,
        max_upload_size_bytes: usize,
    ) -> Self {
        Self {
            gate,
            storage,
            folder_id: folder_id.into(),
            max_upload_size_bytes,
        }
    }

    pub fn from_config(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self::new(
            UploadGate::new(config.upload_token().map(str::to_string)),
            storage,
            config.drive_folder_id(),
            config.max_upload_size_bytes(),
        )
    }

    pub fn gate(&self) -> &UploadGate {
        &self.gate
    }

    /// Run the whole pipeline for one request.
    pub async fn handle<S, E>(
        &self,
        method: &Method,
        headers: &HeaderMap,
        body: S,
    ) -> Result<UploadReceipt, AppError>
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
    {
        self.gate.admit(method, headers)?;
        self.process(headers, body).await
    }

    /// Extract, name and store an already admitted request.
    pub async fn process<S, E>(&self, headers: &HeaderMap, body: S) -> Result<UploadReceipt, AppError>
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
    {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        let parsed = crate::utils::multipart::extract_upload(
            content_type,
            body,
            self.max_upload_size_bytes as u64,
        )
        .await?;

        let qr_id = parsed.qr_id().map(str::to_string);
        let (file, _fields) = parsed.into_file()?;
        let filename = stored_object_name_now(qr_id.as_deref(), &file.file_name);

        tracing::info!(
            qr_id = ?qr_id,
            original_name = %file.file_name,
            mime_type = %file.mime_type,
            size_bytes = file.bytes.len(),
            filename = %filename,
            backend = self.storage.backend_name(),
            "Storing upload"
        );

        let stored = self
            .storage
            .create_file(&filename, &file.mime_type, file.bytes, &self.folder_id)
            .await?;

        tracing::info!(filename = %filename, file_id = %stored.id, "Upload stored");

        Ok(UploadReceipt {
            filename,
            file_id: stored.id,
        })
    }
}
