use std::path::Path;

use anyhow::{anyhow, Result};

use gitvitae_ai::{new_chat_model, ChatRequest, ModelConfig, Provider};
use gitvitae_core::config::AppConfig;
use gitvitae_core::store::{self, Backend};
use gitvitae_core::{prompts, VitaeError};

const SAMPLE_COMMITS: &[&str] = &[
    "chore(database): set up the commit log store",
    "feat(api): add new endpoint to get commit logs",
];

/// `gitvitae ai` — run the bullet-point prompt over two sample commits
/// against the default provider, as a configuration smoke test.
pub fn run(data_dir: &Path, backend: Backend) -> Result<()> {
    let config = AppConfig::load(data_dir)?;
    let option = config
        .default_ai_option()
        .ok_or_else(|| anyhow!("no default ai provider configured; run 'gitvitae init'"))?;

    let store = store::open(backend, data_dir)?;
    let prompt = store
        .get_prompt(prompts::PROJECT_PROMPT)?
        .ok_or_else(|| VitaeError::PromptNotFound(prompts::PROJECT_PROMPT.to_string()))?;

    let commits: Vec<String> = SAMPLE_COMMITS.iter().map(|s| s.to_string()).collect();
    let content = prompts::to_user_content(&commits);
    let messages = super::to_chat_messages(prompt.render(&content));

    let provider: Provider = option.name.parse()?;
    let model = new_chat_model(ModelConfig::new(
        provider,
        option.model.clone(),
        option.api_key.clone(),
    ));
    let lines = model.complete(&ChatRequest {
        messages,
        temperature: prompt.temperature,
        max_tokens: prompt.max_tokens,
    })?;

    println!("Translated:\n{}", commits.join("\n"));
    println!("\nTo:\n{}", lines.join("\n"));
    Ok(())
}
