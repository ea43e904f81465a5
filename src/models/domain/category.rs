use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// One of the four question archetypes of the verbal section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum Category {
    #[serde(rename = "Odd One Out")]
    OddOneOut,
    #[serde(rename = "Analogy")]
    Analogy,
    #[serde(rename = "Non-Logical Word")]
    NonLogicalWord,
    #[serde(rename = "Paragraph Meaning")]
    ParagraphMeaning,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::OddOneOut,
        Category::Analogy,
        Category::NonLogicalWord,
        Category::ParagraphMeaning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::OddOneOut => "Odd One Out",
            Category::Analogy => "Analogy",
            Category::NonLogicalWord => "Non-Logical Word",
            Category::ParagraphMeaning => "Paragraph Meaning",
        }
    }

    /// Card text shown when picking a quiz.
    pub fn quiz_description(&self) -> &'static str {
        match self {
            Category::OddOneOut => "Identify the word that is different from the others.",
            Category::Analogy => "Find the pair that shares the same relationship.",
            Category::NonLogicalWord => "Spot the word that makes the sentence illogical.",
            Category::ParagraphMeaning => "Choose the best summary for the paragraph.",
        }
    }

    /// Card text shown when picking a lesson.
    pub fn lesson_description(&self) -> &'static str {
        match self {
            Category::OddOneOut => "Learn how to identify the different word.",
            Category::Analogy => "Master relationship patterns and pairs.",
            Category::NonLogicalWord => "Detect words that break sentence logic.",
            Category::ParagraphMeaning => "Find the main idea in paragraphs.",
        }
    }

    /// Whether generated quiz questions must carry a `context` passage.
    pub fn requires_context(&self) -> bool {
        matches!(self, Category::NonLogicalWord | Category::ParagraphMeaning)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| AppError::ValidationError("Invalid category".to_string()))
    }
}

/// Academic level that modulates prompt vocabulary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum Difficulty {
    #[serde(rename = "High School")]
    HighSchool,
    #[default]
    #[serde(rename = "College")]
    College,
    #[serde(rename = "Academic")]
    Academic,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::HighSchool, Difficulty::College, Difficulty::Academic];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::HighSchool => "High School",
            Difficulty::College => "College",
            Difficulty::Academic => "Academic",
        }
    }

    /// Unknown labels fall back to `College`.
    pub fn from_label(label: &str) -> Self {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parses_every_label() {
        for category in Category::ALL {
            let parsed: Category = category.label().parse().expect("label should parse");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_rejects_unknown_label() {
        let err = "Synonyms".parse::<Category>().unwrap_err();
        assert_eq!(err, AppError::ValidationError("Invalid category".to_string()));
    }

    #[test]
    fn test_category_requires_exact_label() {
        for input in [" Analogy ", "analogy", "Analogy\n"] {
            let err = input.parse::<Category>().unwrap_err();
            assert_eq!(err, AppError::ValidationError("Invalid category".to_string()));
        }
    }

    #[test]
    fn test_category_serializes_as_display_label() {
        let json = serde_json::to_string(&Category::NonLogicalWord).unwrap();
        assert_eq!(json, "\"Non-Logical Word\"");
    }

    #[test]
    fn test_only_sentence_and_paragraph_categories_require_context() {
        assert!(!Category::OddOneOut.requires_context());
        assert!(!Category::Analogy.requires_context());
        assert!(Category::NonLogicalWord.requires_context());
        assert!(Category::ParagraphMeaning.requires_context());
    }

    #[test]
    fn test_difficulty_falls_back_to_college() {
        assert_eq!(Difficulty::from_label("High School"), Difficulty::HighSchool);
        assert_eq!(Difficulty::from_label("academic"), Difficulty::Academic);
        assert_eq!(Difficulty::from_label("PhD"), Difficulty::College);
        assert_eq!(Difficulty::default(), Difficulty::College);
    }
}
