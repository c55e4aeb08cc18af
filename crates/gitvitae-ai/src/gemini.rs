//! Client for the Gemini generateContent API.
//!
//! Gemini has no system role; system and user content are folded into the
//! parts of a single user turn.

use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};
use crate::{http_client, ChatModel, ChatRequest, ModelConfig, Role};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const PROVIDER: &str = "gemini";

pub struct GeminiClient {
    config: ModelConfig,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

impl ChatModel for GeminiClient {
    fn chat(&self, request: &ChatRequest) -> Result<String> {
        if request.messages.is_empty() {
            return Err(AiError::EmptyPrompt);
        }
        if self.config.api_key.is_empty() {
            return Err(AiError::MissingApiKey(PROVIDER));
        }

        let mut system_text = String::new();
        let mut user_text = String::new();
        for message in &request.messages {
            match message.role {
                Role::System => {
                    system_text.push_str(&message.content);
                    system_text.push('\n');
                }
                _ => {
                    user_text.push_str(&message.content);
                    user_text.push('\n');
                }
            }
        }

        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: system_text }, Part { text: user_text }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url(),
            self.config.model,
            self.config.api_key
        );
        let response = http_client()?.post(url).json(&body).send()?;
        let parsed: GenerateResponse = response.json()?;

        if let Some(error) = parsed.error {
            return Err(AiError::Api {
                provider: PROVIDER,
                message: error.message,
            });
        }
        if parsed.candidates.is_empty() {
            return Err(AiError::EmptyResponse(PROVIDER));
        }

        let text = parsed
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, Provider};

    fn request() -> ChatRequest {
        ChatRequest {
            messages: vec![
                Message::system("be terse"),
                Message::user("summarize: chore: bump deps"),
            ],
            temperature: 0.5,
            max_tokens: 300,
        }
    }

    fn client(base_url: String, api_key: &str) -> GeminiClient {
        let mut config = ModelConfig::new(Provider::Gemini, "gemini-2.5-flash", api_key);
        config.base_url = Some(base_url);
        GeminiClient::new(config)
    }

    #[test]
    fn chat_joins_candidate_parts() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".into(), "k-test".into()))
            .with_status(200)
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"• kept deps current"}]}}]}"#,
            )
            .create();

        let raw = client(server.url(), "k-test").chat(&request()).unwrap();
        assert_eq!(raw, "\u{2022} kept deps current");
        mock.assert();
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let err = client("http://localhost:1".to_string(), "")
            .chat(&request())
            .unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey("gemini")));
    }

    #[test]
    fn embedded_error_object_is_surfaced() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":{"code":400,"message":"API key not valid"}}"#)
            .create();

        let err = client(server.url(), "k-bad").chat(&request()).unwrap_err();
        match err {
            AiError::Api { provider, message } => {
                assert_eq!(provider, "gemini");
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create();

        let err = client(server.url(), "k-test").chat(&request()).unwrap_err();
        assert!(matches!(err, AiError::EmptyResponse("gemini")));
    }
}
