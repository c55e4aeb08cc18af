//! Prompt configurations for the bullet-point and summary generators.
//!
//! Prompts are stored in the project store so the dashboard can edit them.
//! The user message carries a `%content%` placeholder substituted with the
//! commit messages at call time.

use serde::{Deserialize, Serialize};

pub const PROJECT_PROMPT: &str = "project";
pub const SUMMARY_PROMPT: &str = "summary";

pub const CONTENT_PLACEHOLDER: &str = "%content%";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    pub title: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<PromptMessage>,
}

impl PromptConfig {
    /// Messages with `%content%` replaced by `content`.
    pub fn render(&self, content: &str) -> Vec<PromptMessage> {
        self.messages
            .iter()
            .map(|m| PromptMessage {
                role: m.role.clone(),
                content: m.content.replace(CONTENT_PLACEHOLDER, content),
            })
            .collect()
    }
}

/// Join commit messages into the user-content block fed to the placeholder.
pub fn to_user_content(commits: &[String]) -> String {
    commits.join("\n")
}

/// The two prompt configs seeded by `gitvitae init`.
pub fn defaults() -> Vec<PromptConfig> {
    vec![
        PromptConfig {
            title: PROJECT_PROMPT.to_string(),
            temperature: 0.5,
            max_tokens: 400,
            messages: vec![
                PromptMessage {
                    role: "system".to_string(),
                    content: "You are a professional resume writer specializing in software \
                              engineering roles. Transform git commit messages into polished, \
                              resume-ready bullet points that highlight technical achievements \
                              and business impact. Use strong action verbs, past tense, and \
                              concise phrasing (1-2 lines max). Do not include any \
                              introduction, summary, or explanation. Only return the bullet \
                              points, each starting with a \"\u{2022}\""
                        .to_string(),
                },
                PromptMessage {
                    role: "user".to_string(),
                    content: "Transform these commit messages into 3-5 concise resume bullet \
                              points: %content%"
                        .to_string(),
                },
            ],
        },
        PromptConfig {
            title: SUMMARY_PROMPT.to_string(),
            temperature: 0.5,
            max_tokens: 300,
            messages: vec![
                PromptMessage {
                    role: "system".to_string(),
                    content: "You are an expert technical writer specializing in crafting \
                              professional resume summaries for software engineers."
                        .to_string(),
                },
                PromptMessage {
                    role: "user".to_string(),
                    content: "Write a concise 3-5 sentence summary highlighting key \
                              programming languages, frameworks, and problem-solving \
                              experience for a Software Engineer: %content%"
                        .to_string(),
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_placeholder() {
        let cfg = &defaults()[0];
        let rendered = cfg.render("feat: add parser");
        assert_eq!(rendered.len(), 2);
        assert!(rendered[1].content.contains("feat: add parser"));
        assert!(!rendered[1].content.contains(CONTENT_PLACEHOLDER));
    }

    #[test]
    fn system_message_is_untouched_by_render() {
        let cfg = &defaults()[0];
        let rendered = cfg.render("anything");
        assert_eq!(rendered[0].content, cfg.messages[0].content);
    }

    #[test]
    fn defaults_cover_project_and_summary() {
        let titles: Vec<String> = defaults().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, [PROJECT_PROMPT, SUMMARY_PROMPT]);
    }

    #[test]
    fn user_content_joins_lines() {
        let content = to_user_content(&["feat: a".to_string(), "fix: b".to_string()]);
        assert_eq!(content, "feat: a\nfix: b");
    }
}
