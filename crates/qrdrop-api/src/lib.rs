//! qrdrop upload endpoint
//!
//! Accepts a `multipart/form-data` photo upload tagged with a QR identifier and stores it
//! in a Google Drive folder. Two deployment shapes share one pipeline:
//! - an axum HTTP server (`setup`, `handlers`)
//! - a serverless function handling one proxy event per invocation (`function`)

pub mod error;
pub mod function;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod utils;

pub use error::HttpAppError;
pub use function::{handle_event, handle_event_with_storage, FunctionEvent, FunctionResponse};
pub use services::{UploadGate, UploadReceipt, UploadResponse, UploadService};
pub use state::AppState;
