//! Client for a local Ollama server (`/api/chat`).

use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};
use crate::{http_client, ChatModel, ChatRequest, Message, ModelConfig};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const PROVIDER: &str = "ollama";

pub struct OllamaClient {
    config: ModelConfig,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

impl ChatModel for OllamaClient {
    fn chat(&self, request: &ChatRequest) -> Result<String> {
        if request.messages.is_empty() {
            return Err(AiError::EmptyPrompt);
        }
        let body = OllamaRequest {
            model: &self.config.model,
            messages: &request.messages,
            stream: false,
        };
        let response = http_client()?
            .post(format!("{}/api/chat", self.base_url()))
            .json(&body)
            .send()?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(AiError::Api {
                provider: PROVIDER,
                message: format!("{status}: {}", text.trim()),
            });
        }
        let parsed: OllamaResponse = response.json()?;
        Ok(parsed.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Provider;

    fn request() -> ChatRequest {
        ChatRequest {
            messages: vec![
                Message::system("be terse"),
                Message::user("summarize: feat: add exporter"),
            ],
            temperature: 0.5,
            max_tokens: 400,
        }
    }

    fn client(base_url: String) -> OllamaClient {
        let mut config = ModelConfig::new(Provider::Ollama, "llama3.2", "");
        config.base_url = Some(base_url);
        OllamaClient::new(config)
    }

    #[test]
    fn chat_extracts_message_content() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":{"role":"assistant","content":"• added exporter"}}"#)
            .create();

        let raw = client(server.url()).chat(&request()).unwrap();
        assert_eq!(raw, "\u{2022} added exporter");
        mock.assert();
    }

    #[test]
    fn complete_cleans_bullets() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message":{"role":"assistant","content":"• added exporter\n• fixed sync"}}"#)
            .create();

        let lines = client(server.url()).complete(&request()).unwrap();
        assert_eq!(lines, ["Added exporter", "Fixed sync"]);
    }

    #[test]
    fn non_success_status_is_api_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("model not loaded")
            .create();

        let err = client(server.url()).chat(&request()).unwrap_err();
        assert!(matches!(err, AiError::Api { provider: "ollama", .. }));
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let req = ChatRequest {
            messages: vec![],
            temperature: 0.5,
            max_tokens: 400,
        };
        let err = client("http://localhost:1".to_string()).chat(&req).unwrap_err();
        assert!(matches!(err, AiError::EmptyPrompt));
    }
}
