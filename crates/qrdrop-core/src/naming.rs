//! Stored object naming.
//!
//! Final names have the shape `{qrId}_{epochMillis}_{fileName}`. Uniqueness is only as
//! good as the millisecond clock: two uploads with the same qrId and filename in the
//! same millisecond collide.

use chrono::Utc;

/// Prefix used when the request carries no usable `qrId`.
pub const DEFAULT_QR_ID: &str = "qr";

/// Strip every character outside `[A-Za-z0-9_-]`.
pub fn sanitize_qr_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Build the stored name for an upload.
///
/// A missing or empty `qr_id` falls back to `qr`, as does one that sanitizes to nothing.
/// Plain concatenation of the sanitized id would instead produce an empty prefix
/// (`_{epochMillis}_{fileName}`) for an id such as `"!!!"`; the fallback keeps every
/// name starting with a non-empty prefix.
pub fn stored_object_name(qr_id: Option<&str>, epoch_millis: i64, file_name: &str) -> String {
    let sanitized = sanitize_qr_id(qr_id.filter(|id| !id.is_empty()).unwrap_or(DEFAULT_QR_ID));
    let prefix = if sanitized.is_empty() {
        DEFAULT_QR_ID
    } else {
        sanitized.as_str()
    };
    format!("{}_{}_{}", prefix, epoch_millis, file_name)
}

/// [`stored_object_name`] stamped with the current wall-clock time.
pub fn stored_object_name_now(qr_id: Option<&str>, file_name: &str) -> String {
    stored_object_name(qr_id, Utc::now().timestamp_millis(), file_name)
}
