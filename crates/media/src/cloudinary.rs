//! Cloudinary-backed [`MediaGateway`] implementation.
//!
//! Uploads go to the account's `auto` endpoint so the service detects
//! the resource type itself. Requests are signed: the sorted
//! `key=value` parameter string (everything except `file`, `api_key`,
//! and the signature itself) plus the API secret, digested with
//! SHA-256.

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{MediaGateway, UploadError, UploadedMedia};
use vitrine_core::types::MediaKind;

/// Upload service credentials.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl CloudinaryConfig {
    /// Load credentials from `CLOUDINARY_CLOUD_NAME`,
    /// `CLOUDINARY_API_KEY`, and `CLOUDINARY_API_SECRET`.
    ///
    /// # Panics
    ///
    /// Panics if any of the three variables is missing.
    pub fn from_env() -> Self {
        Self {
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME")
                .expect("CLOUDINARY_CLOUD_NAME must be set"),
            api_key: std::env::var("CLOUDINARY_API_KEY").expect("CLOUDINARY_API_KEY must be set"),
            api_secret: std::env::var("CLOUDINARY_API_SECRET")
                .expect("CLOUDINARY_API_SECRET must be set"),
        }
    }
}

/// HTTP client for the Cloudinary upload API.
pub struct CloudinaryGateway {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

/// The subset of the upload response the application consumes.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    resource_type: String,
}

/// Error envelope returned by the service on rejection.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryGateway {
    /// Create a new gateway client.
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/auto/upload",
            self.config.cloud_name
        )
    }
}

#[async_trait]
impl MediaGateway for CloudinaryGateway {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadedMedia, UploadError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_request(&[("timestamp", &timestamp)], &self.config.api_secret);

        let file_part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), %message, filename, "Upload rejected");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;

        Ok(UploadedMedia {
            kind: MediaKind::from_resource_type(&parsed.resource_type),
            url: parsed.secure_url,
        })
    }
}

/// Build the request signature: parameters sorted by key, joined as
/// `key=value` pairs with `&`, the API secret appended, SHA-256, hex.
fn sign_request(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.to_vec();
    sorted.sort_by_key(|(key, _)| *key);

    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}
