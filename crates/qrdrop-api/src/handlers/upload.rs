use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method},
    Json,
};

use crate::error::HttpAppError;
use crate::services::UploadResponse;
use crate::state::AppState;

/// Accept a `multipart/form-data` upload and store it in the configured Drive folder.
///
/// Routed for every method so that non-POST requests get the plain-text 405 body
/// rather than the router's empty one.
#[tracing::instrument(skip_all, fields(method = %method))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let receipt = state
        .upload
        .handle(&method, &headers, body.into_data_stream())
        .await?;

    Ok(Json(UploadResponse::from(&receipt)))
}
