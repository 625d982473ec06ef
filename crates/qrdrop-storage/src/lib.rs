//! qrdrop Storage Library
//!
//! This crate provides the storage abstraction the upload handler writes to and its
//! Google Drive implementation.
//!
//! The only capability exposed is "create file": a named byte payload is placed in a
//! parent folder and the backend returns an opaque object id. Uploads are a single
//! request; there is no chunking, resuming or retrying.

pub mod factory;
pub mod google_drive;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use google_drive::{GoogleDriveStorage, DRIVE_FILE_SCOPE};
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
