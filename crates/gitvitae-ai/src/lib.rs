//! `gitvitae-ai` — chat completion clients for the bullet-point and summary
//! generators.
//!
//! Three providers sit behind one [`ChatModel`] trait: a local Ollama
//! server, the OpenAI chat completions API, and the Gemini generateContent
//! API. All three are blocking HTTP clients with a 30 second timeout; the
//! caller picks one via [`Provider`] and the configured model name.
//!
//! Raw completions are free text and models love to wrap bullet points in
//! chatter, so [`ChatModel::complete`] runs the response through
//! [`clean::clean_output`] before handing lines back.

pub mod clean;
pub mod error;

mod gemini;
mod ollama;
mod openai;

pub use error::{AiError, Result};
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client() -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()?)
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One completion call: the rendered prompt pair plus its sampling knobs.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    Openai,
    Gemini,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Ollama => "ollama",
            Provider::Openai => "openai",
            Provider::Gemini => "gemini",
        }
    }
}

impl FromStr for Provider {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ollama" => Ok(Provider::Ollama),
            "openai" => Ok(Provider::Openai),
            "gemini" => Ok(Provider::Gemini),
            other => Err(AiError::UnknownProvider(other.to_string())),
        }
    }
}

/// Provider selection plus credentials. `base_url` overrides the provider's
/// default endpoint, used by tests to point at a local mock server.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
}

impl ModelConfig {
    pub fn new(provider: Provider, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: api_key.into(),
            base_url: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ChatModel
// ---------------------------------------------------------------------------

pub trait ChatModel: Send + Sync {
    /// The raw completion text from the provider.
    fn chat(&self, request: &ChatRequest) -> Result<String>;

    /// Completion post-processed into clean bullet lines.
    fn complete(&self, request: &ChatRequest) -> Result<Vec<String>> {
        let raw = self.chat(request)?;
        Ok(clean::clean_output(&raw))
    }
}

/// Construct the client for the configured provider.
pub fn new_chat_model(config: ModelConfig) -> Box<dyn ChatModel> {
    match config.provider {
        Provider::Ollama => Box::new(OllamaClient::new(config)),
        Provider::Openai => Box::new(OpenAiClient::new(config)),
        Provider::Gemini => Box::new(GeminiClient::new(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("ollama".parse::<Provider>().unwrap(), Provider::Ollama);
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::Openai);
        assert_eq!("Gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert!(matches!(
            "mistral".parse::<Provider>(),
            Err(AiError::UnknownProvider(_))
        ));
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = Message::system("be terse");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""role":"system""#));
    }
}
