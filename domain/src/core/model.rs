//! Model identity value object

use serde::{Deserialize, Serialize};

/// The model answering classification requests (Value Object)
///
/// A base causal language model, optionally specialised by a
/// parameter-efficient fine-tuning adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelIdentity {
    base_model: String,
    adapter: Option<String>,
}

impl ModelIdentity {
    pub fn new(base_model: impl Into<String>) -> Self {
        Self {
            base_model: base_model.into(),
            adapter: None,
        }
    }

    pub fn with_adapter(mut self, adapter: impl Into<String>) -> Self {
        let adapter = adapter.into();
        self.adapter = if adapter.trim().is_empty() {
            None
        } else {
            Some(adapter)
        };
        self
    }

    pub fn base_model(&self) -> &str {
        &self.base_model
    }

    pub fn adapter(&self) -> Option<&str> {
        self.adapter.as_deref()
    }
}

impl std::fmt::Display for ModelIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.adapter {
            Some(adapter) => write!(f, "{}+{}", self.base_model, adapter),
            None => write!(f, "{}", self.base_model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_adapter() {
        let model = ModelIdentity::new("meta-llama/Llama-3.2-1B-Instruct")
            .with_adapter("climate-narratives-lora");
        assert_eq!(
            model.to_string(),
            "meta-llama/Llama-3.2-1B-Instruct+climate-narratives-lora"
        );
    }

    #[test]
    fn test_blank_adapter_is_ignored() {
        let model = ModelIdentity::new("base").with_adapter("  ");
        assert_eq!(model.adapter(), None);
        assert_eq!(model.to_string(), "base");
    }
}
