//! Classification result types

use crate::taxonomy::Category;
use serde::{Deserialize, Serialize};

/// Raw outcome of parsing a completion, before range validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAnswer {
    /// Digit found in the answer, if any (0-9)
    pub category_code: Option<u8>,
    pub explanation: String,
}

/// Outcome of classifying a claim
///
/// `category` is `None` when the model gave no usable code; the explanation
/// then carries whatever the model said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Option<Category>,
    pub explanation: String,
}

impl ClassificationResult {
    pub fn is_classified(&self) -> bool {
        self.category.is_some()
    }
}

impl From<DecodedAnswer> for ClassificationResult {
    /// Digits 8 and 9 are outside the taxonomy and yield no category.
    fn from(decoded: DecodedAnswer) -> Self {
        Self {
            category: decoded
                .category_code
                .and_then(|code| Category::from_code(i64::from(code))),
            explanation: decoded.explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_code_maps_to_category() {
        let result = ClassificationResult::from(DecodedAnswer {
            category_code: Some(4),
            explanation: "solar is a scam".to_string(),
        });
        assert_eq!(result.category, Some(Category::SolutionOpposition));
        assert!(result.is_classified());
    }

    #[test]
    fn test_out_of_taxonomy_digit_is_unclassified() {
        let result = ClassificationResult::from(DecodedAnswer {
            category_code: Some(9),
            explanation: "none of these".to_string(),
        });
        assert_eq!(result.category, None);
        assert_eq!(result.explanation, "none of these");
    }
}
