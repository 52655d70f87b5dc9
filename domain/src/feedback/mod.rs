//! User feedback on predictions.

use crate::core::claim::Claim;
use crate::core::error::DomainError;
use crate::taxonomy::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A labeled correction of a prediction, appended once to the feedback sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    pub user_claim: Claim,
    pub predicted_category: Category,
    pub correct_category: Category,
}

impl FeedbackRecord {
    /// Validate raw inputs into a record.
    ///
    /// Both codes are checked against the taxonomy range before anything else
    /// happens with them; `predicted_category` is checked first.
    pub fn new(
        timestamp: DateTime<Utc>,
        user_claim: &str,
        predicted_category: i64,
        correct_category: i64,
    ) -> Result<Self, DomainError> {
        let predicted_category = Category::parse_field("predicted_category", predicted_category)?;
        let correct_category = Category::parse_field("correct_category", correct_category)?;
        let user_claim = Claim::new(user_claim)?;

        Ok(Self {
            timestamp,
            user_claim,
            predicted_category,
            correct_category,
        })
    }

    /// Whether the user agreed with the prediction
    pub fn is_confirmation(&self) -> bool {
        self.predicted_category == self.correct_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() {
        let record = FeedbackRecord::new(Utc::now(), " It's the sun ", 2, 2).unwrap();
        assert_eq!(record.user_claim.content(), "It's the sun");
        assert_eq!(record.predicted_category, Category::AttributionDenial);
        assert!(record.is_confirmation());
    }

    #[test]
    fn test_predicted_out_of_range_rejected_regardless_of_correct() {
        for correct in [0, 7, 42, -3] {
            let err = FeedbackRecord::new(Utc::now(), "claim", 9, correct).unwrap_err();
            assert_eq!(
                err,
                DomainError::OutOfRangeCategory {
                    field: "predicted_category",
                    value: 9
                }
            );
        }
    }

    #[test]
    fn test_correct_out_of_range_rejected() {
        let err = FeedbackRecord::new(Utc::now(), "claim", 1, -1).unwrap_err();
        assert_eq!(
            err,
            DomainError::OutOfRangeCategory {
                field: "correct_category",
                value: -1
            }
        );
    }

    #[test]
    fn test_empty_claim_rejected() {
        let err = FeedbackRecord::new(Utc::now(), "   ", 1, 1).unwrap_err();
        assert_eq!(err, DomainError::EmptyClaim);
    }
}
