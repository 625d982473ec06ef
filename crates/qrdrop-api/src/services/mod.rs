pub mod upload;

pub use upload::{UploadGate, UploadReceipt, UploadResponse, UploadService, UPLOAD_TOKEN_HEADER};
