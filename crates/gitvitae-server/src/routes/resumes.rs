use axum::extract::{Path, State};
use axum::Json;

use gitvitae_core::model::{
    Education, NewResume, ProjectWorkedOn, Volunteer, WorkExperience,
};
use gitvitae_core::VitaeError;

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/resumes — create a resume shell for a user.
pub async fn create_resume(
    State(app): State<AppState>,
    Json(body): Json<NewResume>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.title.is_empty() {
        return Err(AppError::bad_request("resume title is required"));
    }
    let store = app.store.clone();
    let id = tokio::task::spawn_blocking(move || store.create_resume(&body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "id": id })))
}

/// GET /api/resumes — resume headers.
pub async fn list_resumes(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let resumes = store.get_resumes()?;
        Ok::<_, VitaeError>(serde_json::json!(resumes))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/resumes/:id — full resume with profile and sub-entities.
pub async fn get_resume(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || Ok::<_, VitaeError>(store.get_resume(id)?))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    match result {
        Some(resume) => Ok(Json(serde_json::json!(resume))),
        None => Err(AppError::not_found("resume not found")),
    }
}

#[derive(serde::Deserialize)]
pub struct UpdateResumeBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

/// PUT /api/resumes/:id — partial update of title and skills.
pub async fn update_resume(
    State(app): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateResumeBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || {
        store.update_resume(id, body.title.as_deref(), body.skills.as_deref())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "updated": id })))
}

/// DELETE /api/resumes/:id — cascading delete.
pub async fn delete_resume(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || store.delete_resume(id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": id })))
}

// ---------------------------------------------------------------------------
// Sub-entities
// ---------------------------------------------------------------------------

/// PUT /api/resumes/:id/work-experiences — batch upsert.
pub async fn upsert_work_experiences(
    State(app): State<AppState>,
    Path(id): Path<i64>,
    Json(items): Json<Vec<WorkExperience>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let ids = tokio::task::spawn_blocking(move || store.upsert_work_experiences(id, &items))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "ids": ids })))
}

/// PUT /api/resumes/:id/educations — batch upsert.
pub async fn upsert_educations(
    State(app): State<AppState>,
    Path(id): Path<i64>,
    Json(items): Json<Vec<Education>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let ids = tokio::task::spawn_blocking(move || store.upsert_educations(id, &items))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "ids": ids })))
}

/// PUT /api/resumes/:id/volunteers — batch upsert.
pub async fn upsert_volunteers(
    State(app): State<AppState>,
    Path(id): Path<i64>,
    Json(items): Json<Vec<Volunteer>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let ids = tokio::task::spawn_blocking(move || store.upsert_volunteers(id, &items))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "ids": ids })))
}

/// PUT /api/resumes/:id/projects — batch upsert.
pub async fn upsert_projects_worked_on(
    State(app): State<AppState>,
    Path(id): Path<i64>,
    Json(items): Json<Vec<ProjectWorkedOn>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let ids = tokio::task::spawn_blocking(move || store.upsert_projects_worked_on(id, &items))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "ids": ids })))
}

/// DELETE /api/work-experiences/:id
pub async fn delete_work_experience(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || store.delete_work_experience(id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// DELETE /api/educations/:id
pub async fn delete_education(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || store.delete_education(id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// DELETE /api/volunteers/:id
pub async fn delete_volunteer(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || store.delete_volunteer(id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// DELETE /api/resume-projects/:id
pub async fn delete_project_worked_on(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    tokio::task::spawn_blocking(move || store.delete_project_worked_on(id))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "deleted": id })))
}
