//! Handlers for the `/projects` resource.
//!
//! Uploads go through the gateway one file at a time; a rejected file
//! is reported in the response and never aborts the rest of its batch,
//! so a project can land with fewer media than were submitted.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::error::CoreError;
use vitrine_core::ordering;
use vitrine_core::types::DbId;
use vitrine_db::models::project::{CreateProject, ProjectEdit, ProjectWithMedia};
use vitrine_db::models::project_media::CreateProjectMedia;
use vitrine_db::repositories::{ProjectMediaRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{read_form, FilePart};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, UploadFailure};
use crate::state::AppState;

/// An `{id, order}` pair for bulk reordering. Pairs referencing
/// nonexistent rows are silently ignored.
#[derive(Debug, Deserialize)]
pub struct OrderUpdate {
    pub id: DbId,
    pub order: i32,
}

/// Count of rows actually touched by a bulk order update.
#[derive(Debug, Serialize)]
pub struct OrderUpdateResult {
    pub updated: u64,
}

/// Response for project mutations that may upload files.
#[derive(Debug, Serialize)]
pub struct ProjectMutation {
    pub project: ProjectWithMedia,
    /// Number of files that made it through the gateway.
    pub uploaded: usize,
    pub failures: Vec<UploadFailure>,
}

/// GET /api/v1/projects
///
/// Public listing with media, ascending by `(sort_order, id)`.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProjectWithMedia>>>> {
    let projects = ProjectRepo::list_with_media(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
///
/// Multipart form: `title` (required), `description` (optional),
/// repeated `image` file parts (zero or more). The project row is
/// created first with an empty cover; the first successfully uploaded
/// file becomes the cover and each success gets one media row, ordered
/// by submission position.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectMutation>>)> {
    let (texts, files) = read_form(multipart).await?;

    let title = texts
        .get("title")
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    if title.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title is required".into(),
        )));
    }
    let description = texts.get("description").filter(|d| !d.is_empty()).cloned();

    let project = ProjectRepo::create(&state.pool, &CreateProject { title, description }).await?;

    let files: Vec<FilePart> = files.into_iter().filter(|f| f.field == "image").collect();
    let orders = ordering::initial_orders(files.len());

    let mut uploaded = 0;
    let mut failures = Vec::new();
    let mut cover: Option<String> = None;

    for (i, file) in files.into_iter().enumerate() {
        match state.gateway.upload(file.bytes, &file.filename).await {
            Ok(media) => {
                if cover.is_none() {
                    cover = Some(media.url.clone());
                }
                ProjectMediaRepo::create(
                    &state.pool,
                    &CreateProjectMedia {
                        project_id: project.id,
                        url: media.url,
                        media_type: media.kind.as_str().to_string(),
                        sort_order: orders[i],
                    },
                )
                .await?;
                uploaded += 1;
            }
            Err(err) => {
                tracing::warn!(filename = %file.filename, error = %err, "Upload failed");
                failures.push(UploadFailure {
                    filename: file.filename,
                    reason: err.to_string(),
                });
            }
        }
    }

    if let Some(url) = cover {
        ProjectRepo::set_cover(&state.pool, project.id, &url).await?;
    }

    let project = load_with_media(&state, project.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProjectMutation {
                project,
                uploaded,
                failures,
            },
        }),
    ))
}

/// PUT /api/v1/projects/{id}
///
/// Multipart form: `title`, `description`, `media_order` (JSON array of
/// `{id, order}`), `delete_media` (JSON array of media ids), repeated
/// `new_images` file parts. Field updates, order changes, and deletions
/// commit in one transaction; new uploads append after the surviving
/// maximum order; the cover is re-derived last from whatever survived.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<ProjectMutation>>> {
    let (texts, files) = read_form(multipart).await?;

    let edit = ProjectEdit {
        title: texts
            .get("title")
            .map(|t| t.trim().to_string())
            .unwrap_or_default(),
        description: texts.get("description").filter(|d| !d.is_empty()).cloned(),
        media_orders: parse_order_pairs(texts.get("media_order"), "media_order")?,
        delete_media: parse_id_list(texts.get("delete_media"), "delete_media")?,
    };

    if !ProjectRepo::apply_edit(&state.pool, id, &edit).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    let files: Vec<FilePart> = files
        .into_iter()
        .filter(|f| f.field == "new_images")
        .collect();
    let max_order = ProjectMediaRepo::max_order(&state.pool, id).await?;
    let orders = ordering::append_orders(max_order, files.len());

    let mut uploaded = 0;
    let mut failures = Vec::new();

    for (i, file) in files.into_iter().enumerate() {
        match state.gateway.upload(file.bytes, &file.filename).await {
            Ok(media) => {
                ProjectMediaRepo::create(
                    &state.pool,
                    &CreateProjectMedia {
                        project_id: id,
                        url: media.url,
                        media_type: media.kind.as_str().to_string(),
                        sort_order: orders[i],
                    },
                )
                .await?;
                uploaded += 1;
            }
            Err(err) => {
                tracing::warn!(filename = %file.filename, error = %err, "Upload failed");
                failures.push(UploadFailure {
                    filename: file.filename,
                    reason: err.to_string(),
                });
            }
        }
    }

    // Re-derive the cover; an empty collection leaves it untouched.
    let media = ProjectMediaRepo::list_by_project(&state.pool, id).await?;
    let keys: Vec<(i32, DbId)> = media.iter().map(|m| (m.sort_order, m.id)).collect();
    if let Some(idx) = ordering::cover_index(&keys) {
        ProjectRepo::set_cover(&state.pool, id, &media[idx].url).await?;
    }

    let project = load_with_media(&state, id).await?;
    Ok(Json(DataResponse {
        data: ProjectMutation {
            project,
            uploaded,
            failures,
        },
    }))
}

/// DELETE /api/v1/projects/{id}
///
/// Explicit cascade: media rows and the project row go in one
/// transaction.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete_with_media(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

/// PUT /api/v1/projects/order
///
/// Bulk reorder: all pairs apply in one transaction, unknown ids are
/// ignored.
pub async fn bulk_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(updates): Json<Vec<OrderUpdate>>,
) -> AppResult<Json<DataResponse<OrderUpdateResult>>> {
    let pairs: Vec<(DbId, i32)> = updates.iter().map(|u| (u.id, u.order)).collect();
    let updated = ProjectRepo::bulk_set_order(&state.pool, &pairs).await?;
    Ok(Json(DataResponse {
        data: OrderUpdateResult { updated },
    }))
}

/// Fetch a project joined with its ordered media.
async fn load_with_media(state: &AppState, id: DbId) -> AppResult<ProjectWithMedia> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let media = ProjectMediaRepo::list_by_project(&state.pool, id).await?;
    Ok(ProjectWithMedia { project, media })
}

/// Parse an optional JSON `[{id, order}]` text field.
fn parse_order_pairs(raw: Option<&String>, field: &str) -> AppResult<Vec<(DbId, i32)>> {
    match raw.map(String::as_str) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str::<Vec<OrderUpdate>>(json)
            .map(|updates| updates.into_iter().map(|u| (u.id, u.order)).collect())
            .map_err(|e| AppError::BadRequest(format!("Invalid {field} payload: {e}"))),
    }
}

/// Parse an optional JSON `[id, ...]` text field.
fn parse_id_list(raw: Option<&String>, field: &str) -> AppResult<Vec<DbId>> {
    match raw.map(String::as_str) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| AppError::BadRequest(format!("Invalid {field} payload: {e}"))),
    }
}
