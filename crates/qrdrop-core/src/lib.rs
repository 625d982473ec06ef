//! qrdrop Core Library
//!
//! This crate provides the configuration, credential schema, error types and
//! upload models shared by the storage client and both request-handler shapes.

pub mod config;
pub mod credentials;
pub mod error;
pub mod naming;
pub mod upload;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LogFormat, UploadConfig};
pub use credentials::ServiceAccountKey;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use naming::{sanitize_qr_id, stored_object_name, stored_object_name_now};
pub use upload::{FormFields, ParsedUpload, UploadedFile};
