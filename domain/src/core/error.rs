//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Claim cannot be empty")]
    EmptyClaim,

    #[error("Malformed completion: role marker '{marker}' not found in model output")]
    MalformedCompletion { marker: &'static str },

    #[error("{field} must be between 0 and 7, got {value}")]
    OutOfRangeCategory { field: &'static str, value: i64 },
}

impl DomainError {
    /// Check if this error comes from a bad caller input (as opposed to a bad model output)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyClaim | DomainError::OutOfRangeCategory { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let error = DomainError::OutOfRangeCategory {
            field: "predicted_category",
            value: 9,
        };
        assert_eq!(
            error.to_string(),
            "predicted_category must be between 0 and 7, got 9"
        );
    }

    #[test]
    fn test_is_validation_check() {
        assert!(DomainError::EmptyClaim.is_validation());
        assert!(
            DomainError::OutOfRangeCategory {
                field: "correct_category",
                value: -1
            }
            .is_validation()
        );
        assert!(
            !DomainError::MalformedCompletion {
                marker: "assistant"
            }
            .is_validation()
        );
    }
}
