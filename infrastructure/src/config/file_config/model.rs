//! Model configuration from TOML (`[model]` section)

use narrative_domain::{ChatTemplate, ConfigIssue, ConfigIssueCode, ModelIdentity};
use serde::{Deserialize, Serialize};

/// Base model, adapter and prompt format
///
/// # Example
///
/// ```toml
/// [model]
/// base_model = "meta-llama/Llama-3.2-1B-Instruct"
/// adapter = "climate-narratives-lora"
/// chat_template = "llama3"
/// max_new_tokens = 128
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Base causal language model name
    pub base_model: String,
    /// Fine-tuning adapter name; also the object prefix in the adapter bucket
    pub adapter: String,
    /// Chat template: "llama3", "chat_ml" or "plain"
    pub chat_template: String,
    /// Generation budget per classification
    pub max_new_tokens: u32,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            base_model: "meta-llama/Llama-3.2-1B-Instruct".to_string(),
            adapter: "climate-narratives-lora".to_string(),
            chat_template: ChatTemplate::default().as_str().to_string(),
            max_new_tokens: 128,
        }
    }
}

impl FileModelConfig {
    pub fn identity(&self) -> ModelIdentity {
        ModelIdentity::new(self.base_model.trim()).with_adapter(self.adapter.trim())
    }

    /// Parse the chat template, reporting an issue for unknown names.
    pub fn parse_chat_template(&self) -> (ChatTemplate, Vec<ConfigIssue>) {
        match self.chat_template.parse::<ChatTemplate>() {
            Ok(template) => (template, Vec::new()),
            Err(_) => (
                ChatTemplate::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "model.chat_template".to_string(),
                        value: self.chat_template.clone(),
                        valid_values: vec![
                            "llama3".to_string(),
                            "chat_ml".to_string(),
                            "plain".to_string(),
                        ],
                    },
                    format!("model.chat_template: unknown value '{}'", self.chat_template),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_chat_template().1;

        if self.base_model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: "model.base_model".to_string(),
                },
                "model.base_model cannot be empty",
            ));
        }

        if self.max_new_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "model.max_new_tokens".to_string(),
                },
                "model.max_new_tokens must be greater than 0",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_template_parse() {
        let config = FileModelConfig {
            chat_template: "chat_ml".to_string(),
            ..Default::default()
        };
        let (template, issues) = config.parse_chat_template();
        assert_eq!(template, ChatTemplate::ChatMl);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_unknown_chat_template_is_error() {
        let config = FileModelConfig {
            chat_template: "alpaca".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0].code,
            ConfigIssueCode::InvalidEnumValue { .. }
        ));
    }

    #[test]
    fn test_identity() {
        let config = FileModelConfig::default();
        assert_eq!(
            config.identity().to_string(),
            "meta-llama/Llama-3.2-1B-Instruct+climate-narratives-lora"
        );
    }
}
