use crate::{GoogleDriveStorage, Storage, StorageResult};
use qrdrop_core::Config;
use std::sync::Arc;

/// Create the storage backend described by the configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = GoogleDriveStorage::new(
        config.service_account(),
        config.drive_api_root_url().to_string(),
    )
    .await?;
    tracing::debug!(
        client_email = %config.service_account().client_email,
        root_url = %config.drive_api_root_url(),
        "Google Drive storage initialized"
    );
    Ok(Arc::new(storage))
}
