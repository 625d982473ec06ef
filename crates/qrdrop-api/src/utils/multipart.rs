//! Streaming `multipart/form-data` extraction shared by the server and the function.
//!
//! Parts carrying a filename in their Content-Disposition are treated as the file;
//! everything else is a text field. Only one file is kept: when several are sent the
//! last completed one wins.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use futures::Stream;
use multer::{Constraints, Multipart, SizeLimit};
use qrdrop_core::{AppError, ParsedUpload, UploadedFile};

/// Drain a multipart body into a [`ParsedUpload`].
///
/// `max_body_bytes` caps the whole stream; exceeding it yields `PayloadTooLarge`.
pub async fn extract_upload<S, E>(
    content_type: Option<&str>,
    body: S,
    max_body_bytes: u64,
) -> Result<ParsedUpload, AppError>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<Box<dyn std::error::Error + Send + Sync>> + 'static,
{
    let content_type = content_type
        .filter(|ct| !ct.trim().is_empty())
        .ok_or(AppError::MissingContentType)?;
    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| AppError::Parse(format!("Invalid multipart Content-Type: {}", e)))?;

    let constraints = Constraints::new().size_limit(SizeLimit::new().whole_stream(max_body_bytes));
    let mut multipart = Multipart::with_constraints(body, boundary, constraints);

    let mut parsed = ParsedUpload::default();
    while let Some(field) = multipart.next_field().await.map_err(map_multer_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let mime_type = field
                    .content_type()
                    .map(|mime| format!("{}/{}", mime.type_(), mime.subtype()));
                let bytes = field.bytes().await.map_err(map_multer_error)?;
                tracing::debug!(
                    field = %name,
                    file_name = %file_name,
                    mime_type = ?mime_type,
                    size_bytes = bytes.len(),
                    "File part received"
                );
                parsed.set_file(UploadedFile::new(
                    bytes,
                    Some(&file_name),
                    mime_type.as_deref(),
                ));
            }
            None => {
                let value = field.text().await.map_err(map_multer_error)?;
                tracing::debug!(field = %name, value_len = value.len(), "Form field received");
                parsed.set_field(name, value);
            }
        }
    }

    Ok(parsed)
}

/// Decode a serverless event body, which may arrive base64-encoded.
pub fn decode_event_body(body: Option<&str>, is_base64_encoded: bool) -> Result<Bytes, AppError> {
    let body = body.unwrap_or_default();
    if is_base64_encoded {
        STANDARD
            .decode(body.trim())
            .map(Bytes::from)
            .map_err(|e| AppError::Parse(format!("Invalid base64 body: {}", e)))
    } else {
        Ok(Bytes::copy_from_slice(body.as_bytes()))
    }
}

fn map_multer_error(err: multer::Error) -> AppError {
    match err {
        multer::Error::StreamSizeExceeded { limit } => {
            AppError::PayloadTooLarge(format!("request body exceeds {} bytes", limit))
        }
        multer::Error::FieldSizeExceeded { limit, .. } => {
            AppError::PayloadTooLarge(format!("form part exceeds {} bytes", limit))
        }
        other => AppError::Parse(other.to_string()),
    }
}
