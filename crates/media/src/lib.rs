//! Media upload gateway.
//!
//! Uploaded files are stored, transcoded, and served by an external
//! hosting service; this crate normalizes its API into
//! `upload(bytes, filename) -> {url, kind}`. The [`MediaGateway`] trait
//! is the seam handlers depend on, so tests can substitute a stub.

pub mod cloudinary;

use async_trait::async_trait;
use vitrine_core::types::MediaKind;

pub use cloudinary::{CloudinaryConfig, CloudinaryGateway};

/// A successfully uploaded asset: the stable hosted URL and the local
/// two-valued kind derived from the service's resource category.
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    pub url: String,
    pub kind: MediaKind,
}

/// Errors from the upload gateway.
///
/// Size and format limits are enforced by the external service, not
/// locally; `Rejected` carries the service-reported reason so handlers
/// can surface it next to the offending filename.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service answered 2xx but the body was not the expected shape.
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),
}

/// Upload seam implemented by [`CloudinaryGateway`] and by test stubs.
///
/// One call per file: a batch uploads its files sequentially and a
/// failure for one file must not abort the others.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadedMedia, UploadError>;
}
