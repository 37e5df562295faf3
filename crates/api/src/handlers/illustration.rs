//! Handlers for the `/illustrations` resource.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vitrine_core::error::CoreError;
use vitrine_core::ordering;
use vitrine_core::types::DbId;
use vitrine_db::models::illustration::{CreateIllustration, Illustration};
use vitrine_db::repositories::IllustrationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{OrderUpdate, OrderUpdateResult};
use crate::handlers::{read_form, FilePart};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, UploadFailure};
use crate::state::AppState;

/// Response for a batch add: the rows that landed plus per-file upload
/// failures.
#[derive(Debug, Serialize)]
pub struct IllustrationBatch {
    pub added: usize,
    pub illustrations: Vec<Illustration>,
    pub failures: Vec<UploadFailure>,
}

/// GET /api/v1/illustrations
///
/// Public listing, ascending by `(sort_order, id)`.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Illustration>>>> {
    let illustrations = IllustrationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: illustrations,
    }))
}

/// POST /api/v1/illustrations
///
/// Multipart form: repeated `images` file parts. Rejects the request
/// when no file was actually selected. Uploads run sequentially; the
/// surviving rows are inserted in one transaction, so an unexpected
/// database error rolls the whole batch back while per-file upload
/// rejections only shrink it.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<IllustrationBatch>>)> {
    let (_texts, files) = read_form(multipart).await?;
    let files: Vec<FilePart> = files.into_iter().filter(|f| f.field == "images").collect();

    if files.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No image selected".into(),
        )));
    }

    let max_order = IllustrationRepo::max_order(&state.pool).await?;
    let orders = ordering::append_orders(max_order, files.len());

    let mut inputs = Vec::new();
    let mut failures = Vec::new();

    for (i, file) in files.into_iter().enumerate() {
        match state.gateway.upload(file.bytes, &file.filename).await {
            Ok(media) => inputs.push(CreateIllustration {
                image_url: media.url,
                sort_order: orders[i],
            }),
            Err(err) => {
                tracing::warn!(filename = %file.filename, error = %err, "Upload failed");
                failures.push(UploadFailure {
                    filename: file.filename,
                    reason: err.to_string(),
                });
            }
        }
    }

    let created = IllustrationRepo::create_batch(&state.pool, &inputs).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IllustrationBatch {
                added: created.len(),
                illustrations: created,
                failures,
            },
        }),
    ))
}

/// DELETE /api/v1/illustrations/{id}
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if IllustrationRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Illustration",
            id,
        }))
    }
}

/// PUT /api/v1/illustrations/order
///
/// Bulk reorder: all pairs apply in one transaction, unknown ids are
/// ignored.
pub async fn bulk_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(updates): Json<Vec<OrderUpdate>>,
) -> AppResult<Json<DataResponse<OrderUpdateResult>>> {
    let pairs: Vec<(DbId, i32)> = updates.iter().map(|u| (u.id, u.order)).collect();
    let updated = IllustrationRepo::bulk_set_order(&state.pool, &pairs).await?;
    Ok(Json(DataResponse {
        data: OrderUpdateResult { updated },
    }))
}
