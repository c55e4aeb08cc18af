//! Client for the OpenAI chat completions API.

use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};
use crate::{http_client, ChatModel, ChatRequest, Message, ModelConfig};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const PROVIDER: &str = "openai";

pub struct OpenAiClient {
    config: ModelConfig,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

impl ChatModel for OpenAiClient {
    fn chat(&self, request: &ChatRequest) -> Result<String> {
        if request.messages.is_empty() {
            return Err(AiError::EmptyPrompt);
        }
        if self.config.api_key.is_empty() {
            return Err(AiError::MissingApiKey(PROVIDER));
        }
        let body = CompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };
        let response = http_client()?
            .post(format!("{}/v1/chat/completions", self.base_url()))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("{status}: {}", text.trim()));
            return Err(AiError::Api {
                provider: PROVIDER,
                message,
            });
        }
        let parsed: CompletionResponse = response.json()?;
        match parsed.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(AiError::EmptyResponse(PROVIDER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Provider;

    fn request() -> ChatRequest {
        ChatRequest {
            messages: vec![Message::user("transform: fix: race in sync")],
            temperature: 0.5,
            max_tokens: 400,
        }
    }

    fn client(base_url: String, api_key: &str) -> OpenAiClient {
        let mut config = ModelConfig::new(Provider::Openai, "gpt-5-mini", api_key);
        config.base_url = Some(base_url);
        OpenAiClient::new(config)
    }

    #[test]
    fn chat_extracts_first_choice() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"- resolved a race"}}]}"#)
            .create();

        let raw = client(server.url(), "sk-test").chat(&request()).unwrap();
        assert_eq!(raw, "- resolved a race");
        mock.assert();
    }

    #[test]
    fn missing_api_key_is_rejected_before_any_request() {
        let err = client("http://localhost:1".to_string(), "")
            .chat(&request())
            .unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey("openai")));
    }

    #[test]
    fn error_body_message_is_surfaced() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create();

        let err = client(server.url(), "sk-bad").chat(&request()).unwrap_err();
        match err {
            AiError::Api { provider, message } => {
                assert_eq!(provider, "openai");
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_choices_is_empty_response() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create();

        let err = client(server.url(), "sk-test").chat(&request()).unwrap_err();
        assert!(matches!(err, AiError::EmptyResponse("openai")));
    }
}
