use axum::extract::{Path, Query, State};
use axum::Json;

use gitvitae_core::model::SummaryUpsert;
use gitvitae_core::VitaeError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

/// GET /api/projects — all projects with their commits.
pub async fn list_projects(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let projects =
            store.get_all_projects(params.limit.unwrap_or(0), params.offset.unwrap_or(0))?;
        Ok::<_, VitaeError>(serde_json::json!(projects))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/projects/:name — one project by name.
pub async fn get_project(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        Ok::<_, VitaeError>(store.get_project_by_name(&name)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    match result {
        Some(project) => Ok(Json(serde_json::json!(project))),
        None => Err(AppError::not_found("project not found")),
    }
}

/// DELETE /api/projects/:name — cascading delete.
pub async fn delete_project(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let id = tokio::task::spawn_blocking(move || {
        let project = store
            .get_project_by_name(&name)?
            .ok_or(VitaeError::ProjectNotFound(name))?;
        store.delete_project(project.id)?;
        Ok::<_, VitaeError>(project.id)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// GET /api/projects/:name/summaries — summaries for one project.
pub async fn list_summaries(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let project = store
            .get_project_by_name(&name)?
            .ok_or(VitaeError::ProjectNotFound(name))?;
        let summaries = store.get_commit_summaries(project.id)?;
        Ok::<_, VitaeError>(serde_json::json!(summaries))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// PUT /api/commits — bulk upsert of commit summaries.
pub async fn bulk_upsert_summaries(
    State(app): State<AppState>,
    Json(batch): Json<Vec<SummaryUpsert>>,
) -> Result<Json<serde_json::Value>, AppError> {
    if batch.is_empty() {
        return Err(AppError::bad_request("empty summary batch"));
    }
    let store = app.store.clone();
    let count = batch.len();
    tokio::task::spawn_blocking(move || store.upsert_commit_summaries(&batch))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "updated": count })))
}
