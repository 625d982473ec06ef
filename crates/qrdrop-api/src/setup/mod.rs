//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::services::UploadService;
use crate::state::AppState;
use anyhow::{Context, Result};
use qrdrop_core::Config;
use std::sync::Arc;

/// Build storage, services and routes from a loaded configuration
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let storage = qrdrop_storage::create_storage(&config)
        .await
        .context("Failed to initialize Google Drive storage")?;

    let upload = UploadService::from_config(&config, storage);
    if !upload.gate().token_required() {
        tracing::warn!("UPLOAD_TOKEN is not set - the upload endpoint accepts any POST");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        upload,
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
