//! Combined admin dashboard view.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vitrine_db::models::illustration::Illustration;
use vitrine_db::models::project::ProjectWithMedia;
use vitrine_db::repositories::{IllustrationRepo, ProjectRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Everything the admin dashboard renders, both collections ascending
/// by `(sort_order, id)`.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub projects: Vec<ProjectWithMedia>,
    pub illustrations: Vec<Illustration>,
}

/// GET /api/v1/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<DashboardView>>> {
    let projects = ProjectRepo::list_with_media(&state.pool).await?;
    let illustrations = IllustrationRepo::list(&state.pool).await?;

    Ok(Json(DataResponse {
        data: DashboardView {
            projects,
            illustrations,
        },
    }))
}
