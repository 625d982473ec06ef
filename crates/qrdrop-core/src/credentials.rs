//! Service-account credential schema.
//!
//! The credential arrives as the JSON key file Google issues for a service account.
//! Only the fields needed for the JWT bearer flow are read; everything else in the
//! blob is ignored.

use std::fmt;

use serde::Deserialize;

use crate::error::AppError;

/// Google OAuth2 token endpoint used when the key file omits `token_uri`.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Service-account key material.
///
/// `Debug` is implemented by hand so the private key never reaches a log line.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse and validate a service-account JSON blob.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let key: ServiceAccountKey = serde_json::from_str(raw).map_err(|e| {
            // serde_json errors only carry line/column, never the offending content.
            AppError::Config(format!("Invalid service account JSON: {}", e))
        })?;
        key.validate()?;
        Ok(key)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.client_email.trim().is_empty() {
            return Err(AppError::Config(
                "Service account JSON has an empty client_email".to_string(),
            ));
        }
        if !self.private_key.contains("PRIVATE KEY-----") {
            return Err(AppError::Config(
                "Service account private_key is not a PEM private key".to_string(),
            ));
        }
        if self.token_uri.trim().is_empty() {
            return Err(AppError::Config(
                "Service account token_uri is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}
