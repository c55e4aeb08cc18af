use axum::extract::{Path, State};
use axum::Json;

use gitvitae_core::model::{NewUser, User};
use gitvitae_core::VitaeError;

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/users — create the local user record.
pub async fn create_user(
    State(app): State<AppState>,
    Json(body): Json<NewUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.email.is_empty() {
        return Err(AppError::bad_request("email is required"));
    }
    let store = app.store.clone();
    let id = tokio::task::spawn_blocking(move || store.create_user(&body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "id": id })))
}

/// GET /api/users/:id
pub async fn get_user(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || Ok::<_, VitaeError>(store.get_user(id)?))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    match result {
        Some(user) => Ok(Json(serde_json::json!(user))),
        None => Err(AppError::not_found("user not found")),
    }
}

/// PUT /api/users — full-row update.
pub async fn update_user(
    State(app): State<AppState>,
    Json(body): Json<User>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let id = body.id;
    tokio::task::spawn_blocking(move || store.update_user(&body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "updated": id })))
}
