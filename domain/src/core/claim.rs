//! Claim value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A claim to be classified (Value Object)
///
/// Always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Claim {
    content: String,
}

impl Claim {
    /// Create a new claim, trimming surrounding whitespace
    pub fn new(content: impl AsRef<str>) -> Result<Self, DomainError> {
        let content = content.as_ref().trim();
        if content.is_empty() {
            return Err(DomainError::EmptyClaim);
        }
        Ok(Self {
            content: content.to_string(),
        })
    }

    /// Get the claim content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Claim {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Claim::new(s)
    }
}

impl From<Claim> for String {
    fn from(claim: Claim) -> Self {
        claim.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_creation_trims() {
        let claim = Claim::new("  CO2 is plant food.\n").unwrap();
        assert_eq!(claim.content(), "CO2 is plant food.");
    }

    #[test]
    fn test_empty_claim_rejected() {
        assert_eq!(Claim::new(""), Err(DomainError::EmptyClaim));
        assert_eq!(Claim::new(" \t\n "), Err(DomainError::EmptyClaim));
    }

    #[test]
    fn test_claim_deserialize_validates() {
        let claim: Claim = serde_json::from_str(r#"" The sun did it ""#).unwrap();
        assert_eq!(claim.content(), "The sun did it");

        let result: Result<Claim, _> = serde_json::from_str(r#""   ""#);
        assert!(result.is_err());
    }
}
