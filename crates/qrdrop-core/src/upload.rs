//! Parsed upload model produced by the multipart extractor.

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::AppError;

/// Filename used when the file part declares none (or an empty one).
pub const DEFAULT_FILE_NAME: &str = "photo.jpg";

/// MIME type used when the file part declares no Content-Type.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Form field carrying the QR identifier used to prefix stored names.
pub const QR_ID_FIELD: &str = "qrId";

/// Non-file form fields, keyed by field name. Later values overwrite earlier ones.
pub type FormFields = HashMap<String, String>;

/// The single file retained from a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub bytes: Bytes,
    pub file_name: String,
    pub mime_type: String,
}

impl UploadedFile {
    /// Build a file, applying the defaults for an absent or empty filename and MIME type.
    pub fn new(bytes: Bytes, file_name: Option<&str>, mime_type: Option<&str>) -> Self {
        let file_name = file_name
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        let mime_type = mime_type
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        Self {
            bytes,
            file_name,
            mime_type,
        }
    }
}

/// Result of draining a multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUpload {
    pub file: Option<UploadedFile>,
    pub fields: FormFields,
}

impl ParsedUpload {
    /// Record a completed file part. The most recently completed file wins.
    pub fn set_file(&mut self, file: UploadedFile) {
        self.file = Some(file);
    }

    /// Record a text field. The most recent value for a name wins.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn qr_id(&self) -> Option<&str> {
        self.fields.get(QR_ID_FIELD).map(String::as_str)
    }

    /// Split into the file and the remaining fields, rejecting bodies without a file.
    pub fn into_file(self) -> Result<(UploadedFile, FormFields), AppError> {
        match self.file {
            Some(file) => Ok((file, self.fields)),
            None => Err(AppError::MissingFile),
        }
    }
}
