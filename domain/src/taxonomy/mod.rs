//! Climate-narrative taxonomy.
//!
//! The eight categories are fixed and ordered by code. Everything that shows
//! the taxonomy to a model or validates a code against it goes through
//! [`Category`].

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A climate-narrative category (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    NotRelevant,
    Denial,
    AttributionDenial,
    ImpactMinimization,
    SolutionOpposition,
    ScienceSkepticism,
    ActorCriticism,
    FossilFuelPromotion,
}

impl Category {
    /// All categories in code order
    pub const ALL: [Category; 8] = [
        Category::NotRelevant,
        Category::Denial,
        Category::AttributionDenial,
        Category::ImpactMinimization,
        Category::SolutionOpposition,
        Category::ScienceSkepticism,
        Category::ActorCriticism,
        Category::FossilFuelPromotion,
    ];

    /// Highest valid code
    pub const MAX_CODE: u8 = 7;

    pub fn code(&self) -> u8 {
        match self {
            Category::NotRelevant => 0,
            Category::Denial => 1,
            Category::AttributionDenial => 2,
            Category::ImpactMinimization => 3,
            Category::SolutionOpposition => 4,
            Category::ScienceSkepticism => 5,
            Category::ActorCriticism => 6,
            Category::FossilFuelPromotion => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::NotRelevant => "Not relevant",
            Category::Denial => "Denial",
            Category::AttributionDenial => "Attribution denial",
            Category::ImpactMinimization => "Impact minimization",
            Category::SolutionOpposition => "Solution opposition",
            Category::ScienceSkepticism => "Science skepticism",
            Category::ActorCriticism => "Actor criticism",
            Category::FossilFuelPromotion => "Fossil fuel promotion",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::NotRelevant => {
                "No climate-related claim, or the claim does not fit any other category."
            }
            Category::Denial => "Claims that climate change is not happening.",
            Category::AttributionDenial => {
                "Claims that humans are not the cause of climate change."
            }
            Category::ImpactMinimization => {
                "Claims that climate change impacts are not bad or even beneficial."
            }
            Category::SolutionOpposition => {
                "Claims that climate solutions do not work or are harmful."
            }
            Category::ScienceSkepticism => {
                "Claims that challenge climate science validity or methods."
            }
            Category::ActorCriticism => {
                "Claims that attack climate scientists, activists or institutions."
            }
            Category::FossilFuelPromotion => {
                "Claims that promote fossil fuels or downplay their harm."
            }
        }
    }

    /// Look up a category by code, returning `None` outside 0-7
    pub fn from_code(code: i64) -> Option<Category> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Look up a category by code, reporting which input field was out of range
    pub fn parse_field(field: &'static str, code: i64) -> Result<Category, DomainError> {
        Self::from_code(code).ok_or(DomainError::OutOfRangeCategory { field, value: code })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.label())
    }
}

impl TryFrom<i64> for Category {
    type Error = DomainError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Category::parse_field("category", code)
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = i64::deserialize(deserializer)?;
        Category::try_from(code).map_err(serde::de::Error::custom)
    }
}
