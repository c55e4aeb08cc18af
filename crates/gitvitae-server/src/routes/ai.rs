use axum::extract::State;
use axum::Json;

use gitvitae_ai::{ChatRequest, Message, ModelConfig, Provider, Role};
use gitvitae_core::config::AppConfig;
use gitvitae_core::prompts::{self, PromptConfig};
use gitvitae_core::VitaeError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct GenerateBody {
    pub commits: Vec<String>,
    /// Prompt config title; defaults to the bullet-point prompt.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Provider name override; defaults to the configured default option.
    #[serde(default)]
    pub provider: Option<String>,
}

/// POST /api/ai — turn commit messages into resume bullet lines.
pub async fn generate(
    State(app): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.commits.is_empty() {
        return Err(AppError::bad_request("no commits supplied"));
    }

    let store = app.store.clone();
    let data_dir = app.data_dir.clone();
    let lines = tokio::task::spawn_blocking(move || {
        let config = AppConfig::load(&data_dir)?;
        let option = match &body.provider {
            Some(name) => config
                .ai_options
                .iter()
                .find(|o| o.name.eq_ignore_ascii_case(name)),
            None => config.default_ai_option(),
        }
        .ok_or_else(|| VitaeError::InvalidInput("no matching ai provider configured".into()))?;

        let title = body.prompt.as_deref().unwrap_or(prompts::PROJECT_PROMPT);
        let prompt = load_prompt(store.as_ref(), title)?;

        let content = prompts::to_user_content(&body.commits);
        let messages: Vec<Message> = prompt
            .render(&content)
            .into_iter()
            .map(|m| Message {
                role: if m.role == "system" {
                    Role::System
                } else {
                    Role::User
                },
                content: m.content,
            })
            .collect();

        let provider: Provider = option.name.parse()?;
        let model = gitvitae_ai::new_chat_model(ModelConfig::new(
            provider,
            option.model.clone(),
            option.api_key.clone(),
        ));
        let request = ChatRequest {
            messages,
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
        };
        Ok::<_, anyhow::Error>(model.complete(&request)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "lines": lines })))
}

/// Stored prompt config if present, otherwise the built-in default for that
/// title.
fn load_prompt(store: &dyn gitvitae_core::store::Store, title: &str) -> Result<PromptConfig, VitaeError> {
    if let Some(prompt) = store.get_prompt(title)? {
        return Ok(prompt);
    }
    prompts::defaults()
        .into_iter()
        .find(|p| p.title == title)
        .ok_or_else(|| VitaeError::PromptNotFound(title.to_string()))
}
