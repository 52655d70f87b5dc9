//! Chat formatting conventions.
//!
//! Instruction-tuned models expect the system and user turns wrapped in the
//! markers they were trained with. Every template ends by opening the
//! `assistant` turn, so the generated answer directly follows that role name.

use serde::{Deserialize, Serialize};

/// Chat template used to combine system and user messages into one prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatTemplate {
    /// Llama 3 header tokens
    #[default]
    Llama3,
    /// `<|im_start|>` / `<|im_end|>` turns (Qwen, SmolLM, ...)
    ChatMl,
    /// Bare role names on their own line, no special tokens
    Plain,
}

impl ChatTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatTemplate::Llama3 => "llama3",
            ChatTemplate::ChatMl => "chat_ml",
            ChatTemplate::Plain => "plain",
        }
    }

    /// Render a system + user exchange, leaving the assistant turn open
    pub fn render(&self, system: &str, user: &str) -> String {
        match self {
            ChatTemplate::Llama3 => format!(
                "<|begin_of_text|><|start_header_id|>system<|end_header_id|>\n\n{system}<|eot_id|>\
                 <|start_header_id|>user<|end_header_id|>\n\n{user}<|eot_id|>\
                 <|start_header_id|>assistant<|end_header_id|>\n\n"
            ),
            ChatTemplate::ChatMl => format!(
                "<|im_start|>system\n{system}<|im_end|>\n\
                 <|im_start|>user\n{user}<|im_end|>\n\
                 <|im_start|>assistant\n"
            ),
            ChatTemplate::Plain => format!("system\n\n{system}\n\nuser\n\n{user}\n\nassistant\n\n"),
        }
    }

    /// Special tokens a tokenizer would drop when decoding with special tokens skipped
    pub fn special_tokens(&self) -> &'static [&'static str] {
        match self {
            ChatTemplate::Llama3 => &[
                "<|begin_of_text|>",
                "<|start_header_id|>",
                "<|end_header_id|>",
                "<|eot_id|>",
            ],
            ChatTemplate::ChatMl => &["<|im_start|>", "<|im_end|>"],
            ChatTemplate::Plain => &[],
        }
    }
}

impl std::fmt::Display for ChatTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChatTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "llama3" | "llama-3" => Ok(ChatTemplate::Llama3),
            "chat_ml" | "chatml" => Ok(ChatTemplate::ChatMl),
            "plain" => Ok(ChatTemplate::Plain),
            other => Err(format!("unknown chat template: {}", other)),
        }
    }
}
