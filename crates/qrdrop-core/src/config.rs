//! Configuration module
//!
//! Configuration is read once from the environment into an explicit `Config` that is
//! passed by reference into the handler and storage constructors. Nothing reads the
//! environment after this point.

use std::env;
use std::fmt;

use crate::credentials::ServiceAccountKey;
use crate::error::AppError;

const SERVER_PORT: u16 = 3000;
const MAX_UPLOAD_SIZE_MB: usize = 25;
const DRIVE_API_ROOT_URL: &str = "https://www.googleapis.com/";

/// Tracing output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: Option<String>) -> Self {
        match value.as_deref().map(str::to_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Process-level settings shared by both deployment shapes
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
}

/// Upload pipeline configuration
#[derive(Clone)]
pub struct UploadConfig {
    pub base: BaseConfig,
    pub service_account: ServiceAccountKey,
    pub drive_folder_id: String,
    /// Expected `X-Upload-Token`. `None` leaves the endpoint open.
    pub upload_token: Option<String>,
    pub max_upload_size_bytes: usize,
    /// Drive API root; uploads go to `{root}upload/drive/v3/files`.
    pub drive_api_root_url: String,
}

impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadConfig")
            .field("base", &self.base)
            .field("service_account", &self.service_account)
            .field("drive_folder_id", &self.drive_folder_id)
            .field(
                "upload_token",
                &self.upload_token.as_ref().map(|_| "<redacted>"),
            )
            .field("max_upload_size_bytes", &self.max_upload_size_bytes)
            .field("drive_api_root_url", &self.drive_api_root_url)
            .finish()
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<UploadConfig>);

impl Config {
    fn as_upload(&self) -> &UploadConfig {
        &self.0
    }

    /// Load configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = UploadConfig::from_lookup(&lookup)?;
        Ok(Config(Box::new(config)))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_upload().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.as_upload().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_upload().base.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_upload().base.cors_origins
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_upload().base.log_format
    }

    pub fn service_account(&self) -> &ServiceAccountKey {
        &self.as_upload().service_account
    }

    pub fn drive_folder_id(&self) -> &str {
        &self.as_upload().drive_folder_id
    }

    pub fn upload_token(&self) -> Option<&str> {
        self.as_upload().upload_token.as_deref()
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_upload().max_upload_size_bytes
    }

    pub fn drive_api_root_url(&self) -> &str {
        &self.as_upload().drive_api_root_url
    }
}

/// Read the expected upload token on its own.
///
/// An empty value counts as unset, which leaves the endpoint open.
pub fn upload_token_from_lookup<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("UPLOAD_TOKEN").filter(|token| !token.is_empty())
}

/// Read the tracing output format on its own (logging starts before full config parsing).
pub fn log_format_from_lookup<F>(lookup: &F) -> LogFormat
where
    F: Fn(&str) -> Option<String>,
{
    LogFormat::parse(lookup("LOG_FORMAT"))
}

impl UploadConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| AppError::Config("PORT must be a valid number".to_string()))?,
            None => SERVER_PORT,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port,
            environment,
            cors_origins,
            log_format: log_format_from_lookup(lookup),
        };

        let raw_credentials = lookup("GOOGLE_SERVICE_ACCOUNT_JSON")
            .filter(|raw| !raw.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("GOOGLE_SERVICE_ACCOUNT_JSON must be set".to_string())
            })?;
        let service_account = ServiceAccountKey::from_json(&raw_credentials)?;

        let drive_folder_id = lookup("DRIVE_FOLDER_ID")
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Config("DRIVE_FOLDER_ID must be set".to_string()))?;

        let max_upload_size_mb = match lookup("MAX_UPLOAD_SIZE_MB") {
            Some(value) => value.trim().parse::<usize>().map_err(|_| {
                AppError::Config("MAX_UPLOAD_SIZE_MB must be a valid number".to_string())
            })?,
            None => MAX_UPLOAD_SIZE_MB,
        };
        if max_upload_size_mb == 0 {
            return Err(AppError::Config(
                "MAX_UPLOAD_SIZE_MB must be greater than zero".to_string(),
            ));
        }

        let drive_api_root_url = lookup("DRIVE_API_ROOT_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DRIVE_API_ROOT_URL.to_string());

        Ok(UploadConfig {
            base,
            service_account,
            drive_folder_id,
            upload_token: upload_token_from_lookup(lookup),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            drive_api_root_url,
        })
    }
}
