use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{category::Category, question::OPTION_COUNT};

pub const DEFAULT_ITEM_PROMPT: &str = "Choose the correct answer:";

/// A worked example or practice item. Which of `base_pair`, `sentence` and
/// `paragraph` is set depends on the lesson category.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct LessonItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_pair: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl LessonItem {
    pub fn prompt(&self) -> &str {
        self.question
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .unwrap_or(DEFAULT_ITEM_PROMPT)
    }

    /// The category-specific stimulus shown above the prompt, if any.
    pub fn stimulus(&self) -> Option<&str> {
        self.base_pair
            .as_deref()
            .or(self.sentence.as_deref())
            .or(self.paragraph.as_deref())
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    pub fn check(&self, category: Category, section: &str, index: usize) -> Result<(), String> {
        let position = index + 1;
        if self.options.len() != OPTION_COUNT {
            return Err(format!(
                "Lesson {section} item {position} has {} options, expected {OPTION_COUNT}",
                self.options.len()
            ));
        }
        if !self.options.contains(&self.correct_answer) {
            return Err(format!(
                "Lesson {section} item {position} has a correct answer that is not among its options"
            ));
        }
        let (field, value) = match category {
            Category::OddOneOut => return Ok(()),
            Category::Analogy => ("base_pair", &self.base_pair),
            Category::NonLogicalWord => ("sentence", &self.sentence),
            Category::ParagraphMeaning => ("paragraph", &self.paragraph),
        };
        if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
            return Err(format!("Lesson {section} item {position} is missing its {field}"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Lesson {
    pub explanation: String,
    #[serde(default)]
    pub common_tricks: Vec<String>,
    pub examples: Vec<LessonItem>,
    pub practice: Vec<LessonItem>,
}

impl Lesson {
    pub fn check(&self, category: Category) -> Result<(), String> {
        if self.explanation.trim().is_empty() {
            return Err("Lesson has no explanation".to_string());
        }
        for (index, item) in self.examples.iter().enumerate() {
            item.check(category, "example", index)?;
        }
        for (index, item) in self.practice.iter().enumerate() {
            item.check(category, "practice", index)?;
        }
        Ok(())
    }
}
