//! App configuration at `~/.gitvitae/config.yaml`: the git identity used
//! for author filtering plus the configured AI providers.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VitaeError};
use crate::paths;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiOption {
    pub name: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub user: UserConfig,
    #[serde(default)]
    pub ai_options: Vec<AiOption>,
}

impl AppConfig {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user: UserConfig {
                name: name.into(),
                email: email.into(),
            },
            ai_options: default_ai_options(),
        }
    }

    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = paths::config_path(data_dir);
        if !path.exists() {
            return Err(VitaeError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: AppConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let path = paths::config_path(data_dir);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// The provider entry flagged as default.
    pub fn default_ai_option(&self) -> Option<&AiOption> {
        self.ai_options.iter().find(|o| o.is_default)
    }

    /// Upsert a provider entry by case-insensitive name and make it the sole
    /// default.
    pub fn update_ai_option(&mut self, option: AiOption) -> Result<()> {
        if option.name.is_empty() || option.model.is_empty() {
            return Err(VitaeError::InvalidInput(
                "ai option name and model are required".to_string(),
            ));
        }
        let mut found = false;
        for existing in &mut self.ai_options {
            if existing.name.eq_ignore_ascii_case(&option.name) {
                existing.api_key = option.api_key.clone();
                existing.model = option.model.clone();
                existing.is_default = true;
                found = true;
            } else {
                existing.is_default = false;
            }
        }
        if !found {
            self.ai_options.push(AiOption {
                is_default: true,
                ..option
            });
        }
        Ok(())
    }
}

/// True once `gitvitae init` has written the config file.
pub fn is_initialized(data_dir: &Path) -> bool {
    paths::config_path(data_dir).exists()
}

fn default_ai_options() -> Vec<AiOption> {
    vec![
        AiOption {
            name: "ollama".to_string(),
            model: "llama3.2".to_string(),
            api_key: String::new(),
            is_default: true,
        },
        AiOption {
            name: "openai".to_string(),
            model: "gpt-5-mini".to_string(),
            api_key: String::new(),
            is_default: false,
        },
        AiOption {
            name: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: String::new(),
            is_default: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::new("Ada", "ada@example.com");
        cfg.save(dir.path()).unwrap();
        let loaded = AppConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.user.email, "ada@example.com");
    }

    #[test]
    fn load_without_init_errors() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, VitaeError::NotInitialized));
    }

    #[test]
    fn new_config_defaults_to_ollama() {
        let cfg = AppConfig::new("Ada", "ada@example.com");
        let default = cfg.default_ai_option().unwrap();
        assert_eq!(default.name, "ollama");
        assert_eq!(default.model, "llama3.2");
    }

    #[test]
    fn update_ai_option_switches_default() {
        let mut cfg = AppConfig::new("Ada", "ada@example.com");
        cfg.update_ai_option(AiOption {
            name: "OpenAI".to_string(),
            model: "gpt-5-mini".to_string(),
            api_key: "sk-test".to_string(),
            is_default: true,
        })
        .unwrap();

        let defaults: Vec<&AiOption> =
            cfg.ai_options.iter().filter(|o| o.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name, "openai");
        assert_eq!(defaults[0].api_key, "sk-test");
    }

    #[test]
    fn update_ai_option_appends_unknown_provider() {
        let mut cfg = AppConfig::new("Ada", "ada@example.com");
        let before = cfg.ai_options.len();
        cfg.update_ai_option(AiOption {
            name: "anthropic".to_string(),
            model: "claude-3-5-haiku".to_string(),
            api_key: String::new(),
            is_default: false,
        })
        .unwrap();
        assert_eq!(cfg.ai_options.len(), before + 1);
        assert!(cfg.ai_options.last().unwrap().is_default);
    }

    #[test]
    fn update_ai_option_rejects_empty_model() {
        let mut cfg = AppConfig::new("Ada", "ada@example.com");
        let err = cfg
            .update_ai_option(AiOption {
                name: "openai".to_string(),
                model: String::new(),
                api_key: String::new(),
                is_default: true,
            })
            .unwrap_err();
        assert!(matches!(err, VitaeError::InvalidInput(_)));
    }

    #[test]
    fn is_initialized_tracks_config_file() {
        let dir = TempDir::new().unwrap();
        assert!(!is_initialized(dir.path()));
        AppConfig::new("Ada", "ada@example.com").save(dir.path()).unwrap();
        assert!(is_initialized(dir.path()));
    }
}
