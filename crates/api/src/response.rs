//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A per-file upload failure surfaced to the admin UI (the
/// flash-message equivalent). One file's failure never aborts the rest
/// of its batch, so mutation responses carry a list of these next to
/// the rows that were persisted.
#[derive(Debug, Clone, Serialize)]
pub struct UploadFailure {
    pub filename: String,
    pub reason: String,
}
