//! Error types module
//!
//! Every failure an upload request can hit is a variant of `AppError`. All of them
//! are terminal for the request; none are retried. The HTTP shape of each variant
//! (status code and client-facing body) is described through `ErrorMetadata` so the
//! server and the serverless function render identical responses.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected rejections like a bad method or token
    Debug,
    /// Warning level - for client mistakes worth noticing (malformed bodies)
    Warn,
    /// Error level - for configuration and upstream failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPSTREAM_FAILURE")
    fn error_code(&self) -> &'static str;

    /// Plain-text body sent to the client. Never contains internal detail.
    fn client_message(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unauthorized: upload token missing or mismatched")]
    Unauthorized,

    #[error("No file received")]
    MissingFile,

    #[error("Missing Content-Type header")]
    MissingContentType,

    #[error("Multipart parse error: {0}")]
    Parse(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream storage failure: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

const UPLOAD_FAILED: &str = "Upload failed";

/// Static metadata for each variant: (http_status, error_code, client_message, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, &'static str, LogLevel) {
    match err {
        AppError::MethodNotAllowed => (
            405,
            "METHOD_NOT_ALLOWED",
            "Method Not Allowed",
            LogLevel::Debug,
        ),
        AppError::Unauthorized => (401, "UNAUTHORIZED", "Unauthorized", LogLevel::Debug),
        AppError::MissingFile => (400, "MISSING_FILE", "No file received", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            "Payload Too Large",
            LogLevel::Warn,
        ),
        AppError::MissingContentType => (
            500,
            "MISSING_CONTENT_TYPE",
            UPLOAD_FAILED,
            LogLevel::Warn,
        ),
        AppError::Parse(_) => (500, "PARSE_ERROR", UPLOAD_FAILED, LogLevel::Warn),
        AppError::Config(_) => (500, "CONFIG_ERROR", UPLOAD_FAILED, LogLevel::Error),
        AppError::Upstream(_) => (500, "UPSTREAM_FAILURE", UPLOAD_FAILED, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", UPLOAD_FAILED, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "MethodNotAllowed",
            AppError::Unauthorized => "Unauthorized",
            AppError::MissingFile => "MissingFile",
            AppError::MissingContentType => "MissingContentType",
            AppError::Parse(_) => "ParseError",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Config(_) => "ConfigError",
            AppError::Upstream(_) => "UpstreamFailure",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> &'static str {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}
