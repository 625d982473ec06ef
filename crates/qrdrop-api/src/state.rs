//! Application state shared by the HTTP handlers.

use qrdrop_core::Config;

use crate::services::UploadService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub upload: UploadService,
}
