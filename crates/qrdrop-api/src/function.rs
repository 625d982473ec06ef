//! Serverless function variant
//!
//! One invocation handles one event in the Lambda-proxy / Netlify shape. The request is
//! admitted (method, then token) before anything else is loaded, so a rejected call
//! never reads credentials. Configuration and the storage client are then built fresh
//! for the invocation and the same [`UploadService`] processing as the HTTP server runs.

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, Method};
use bytes::Bytes;
use qrdrop_core::config::upload_token_from_lookup;
use qrdrop_core::{AppError, Config, ErrorMetadata};
use qrdrop_storage::{create_storage, Storage};
use serde::{Deserialize, Serialize};

use crate::error::log_error;
use crate::services::{UploadGate, UploadReceipt, UploadResponse, UploadService};
use crate::utils::multipart::decode_event_body;

/// Incoming function event
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Function result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl FunctionResponse {
    fn json(status_code: u16, body: &impl Serialize) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self {
                status_code,
                headers: HashMap::from([(
                    CONTENT_TYPE.to_string(),
                    "application/json".to_string(),
                )]),
                body,
            },
            Err(e) => Self::from_error(&AppError::Internal(format!(
                "Failed to serialize response: {}",
                e
            ))),
        }
    }

    /// Same status and body table as the HTTP server.
    pub fn from_error(error: &AppError) -> Self {
        Self {
            status_code: error.http_status_code(),
            headers: HashMap::from([(
                CONTENT_TYPE.to_string(),
                "text/plain; charset=utf-8".to_string(),
            )]),
            body: error.client_message().to_string(),
        }
    }
}

/// Handle one event, building storage from the loaded configuration.
pub async fn handle_event<F>(event: FunctionEvent, lookup: F) -> FunctionResponse
where
    F: Fn(&str) -> Option<String>,
{
    handle_event_with_storage(event, lookup, |config| async move {
        Ok::<_, AppError>(create_storage(&config).await?)
    })
    .await
}

/// Handle one event with a caller-supplied storage constructor.
pub async fn handle_event_with_storage<F, B, Fut>(
    event: FunctionEvent,
    lookup: F,
    build_storage: B,
) -> FunctionResponse
where
    F: Fn(&str) -> Option<String>,
    B: FnOnce(Config) -> Fut,
    Fut: Future<Output = Result<Arc<dyn Storage>, AppError>>,
{
    match run(event, lookup, build_storage).await {
        Ok(receipt) => FunctionResponse::json(200, &UploadResponse::from(&receipt)),
        Err(err) => {
            log_error(&err);
            FunctionResponse::from_error(&err)
        }
    }
}

async fn run<F, B, Fut>(
    event: FunctionEvent,
    lookup: F,
    build_storage: B,
) -> Result<UploadReceipt, AppError>
where
    F: Fn(&str) -> Option<String>,
    B: FnOnce(Config) -> Fut,
    Fut: Future<Output = Result<Arc<dyn Storage>, AppError>>,
{
    let method = Method::from_bytes(event.http_method.as_bytes())
        .map_err(|_| AppError::MethodNotAllowed)?;
    let headers = event_headers(&event.headers);

    UploadGate::new(upload_token_from_lookup(&lookup)).admit(&method, &headers)?;

    let config = Config::from_lookup(lookup)?;
    let storage = build_storage(config.clone()).await?;
    let service = UploadService::from_config(&config, storage);

    let body = decode_event_body(event.body.as_deref(), event.is_base64_encoded)?;
    tracing::debug!(
        size_bytes = body.len(),
        base64 = event.is_base64_encoded,
        "Function event body decoded"
    );
    let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(body) });

    service.process(&headers, stream).await
}

/// Convert event headers into a `HeaderMap` (names are case-insensitive there).
///
/// When the same name appears in several spellings, the all-lowercase one wins.
/// Names or values that are not valid HTTP are dropped.
fn event_headers(raw: &HashMap<String, String>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let (lowercase, mixed): (Vec<_>, Vec<_>) = raw
        .iter()
        .partition(|(name, _)| name.chars().all(|c| !c.is_ascii_uppercase()));

    for (name, value) in mixed.into_iter().chain(lowercase) {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => {
                tracing::debug!(header = %name, "Dropping invalid event header");
            }
        }
    }
    headers
}
