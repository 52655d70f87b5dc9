//! Prompt templates for claim classification

use crate::taxonomy::Category;

/// Templates for the two messages sent with every classification request
pub struct ClassificationPrompt;

impl ClassificationPrompt {
    /// System message listing every category, in code order
    pub fn system() -> String {
        let mut prompt = String::from(
            "You classify short claims about climate change into exactly one narrative category.\n\
             The categories are:\n",
        );

        for category in Category::ALL {
            prompt.push_str(&format!(
                "{} - {}: {}\n",
                category.code(),
                category.label(),
                category.description()
            ));
        }

        prompt.push_str(
            "Answer with the category number first, followed by a short explanation of your choice.",
        );
        prompt
    }

    /// User message embedding the claim
    pub fn user(claim: &str) -> String {
        format!(
            r#"Classify the following claim into a single category.

Claim: {}

Category:"#,
            claim
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_lists_taxonomy_in_order() {
        let system = ClassificationPrompt::system();
        let mut last = 0;
        for category in Category::ALL {
            let line = format!(
                "{} - {}: {}",
                category.code(),
                category.label(),
                category.description()
            );
            let position = system.find(&line).expect("category line missing");
            assert!(position >= last);
            last = position;
        }
    }

    #[test]
    fn test_user_embeds_claim() {
        let user = ClassificationPrompt::user("Wind turbines kill all the birds");
        assert!(user.contains("Claim: Wind turbines kill all the birds"));
    }

    #[test]
    fn test_templates_do_not_contain_role_marker() {
        assert!(!ClassificationPrompt::system().contains("assistant"));
        assert!(!ClassificationPrompt::user("x").contains("assistant"));
    }
}
