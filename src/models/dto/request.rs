use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Category, Difficulty};

/// Body of `POST /api/generate-quiz`. Fields stay optional so that missing
/// values surface as a validation error rather than a deserialization one.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(required, length(min = 1))]
    pub category: Option<String>,

    #[validate(required, range(min = 1))]
    pub count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl GenerateQuizRequest {
    pub fn new(category: Category, count: u32, difficulty: Difficulty) -> Self {
        Self {
            category: Some(category.label().to_string()),
            count: Some(count),
            difficulty: Some(difficulty.label().to_string()),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
            .as_deref()
            .map(Difficulty::from_label)
            .unwrap_or_default()
    }
}

/// Body of `POST /api/teach`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct TeachRequest {
    #[validate(required, length(min = 1))]
    pub category: Option<String>,
}

impl TeachRequest {
    pub fn new(category: Category) -> Self {
        Self {
            category: Some(category.label().to_string()),
        }
    }
}
