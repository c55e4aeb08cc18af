use axum::extract::State;
use axum::Json;

use gitvitae_core::config::{AiOption, AppConfig};
use gitvitae_core::VitaeError;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config/ai — configured provider options.
pub async fn get_ai_config(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let data_dir = app.data_dir.clone();
    let result = tokio::task::spawn_blocking(move || {
        let config = AppConfig::load(&data_dir)?;
        Ok::<_, VitaeError>(serde_json::json!(config.ai_options))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// PUT /api/config/ai — upsert a provider option and make it the default.
pub async fn update_ai_config(
    State(app): State<AppState>,
    Json(option): Json<AiOption>,
) -> Result<Json<serde_json::Value>, AppError> {
    let data_dir = app.data_dir.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut config = AppConfig::load(&data_dir)?;
        config.update_ai_option(option)?;
        config.save(&data_dir)?;
        Ok::<_, VitaeError>(serde_json::json!(config.ai_options))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
