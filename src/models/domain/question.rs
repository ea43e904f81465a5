use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::category::Category;

pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Question {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Category,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    /// Shape checks applied to generated questions before they reach a
    /// session. `category` is the one that was requested, not the model's
    /// own tag. Returns a message naming the offending question.
    pub fn check(&self, category: Category, index: usize) -> Result<(), String> {
        let position = index + 1;
        if self.kind != category {
            return Err(format!(
                "Question {position} is tagged {}, expected {category}",
                self.kind
            ));
        }
        if self.question_text.trim().is_empty() {
            return Err(format!("Question {position} has no question text"));
        }
        if self.options.len() != OPTION_COUNT {
            return Err(format!(
                "Question {position} has {} options, expected {OPTION_COUNT}",
                self.options.len()
            ));
        }
        if !self.options.contains(&self.correct_answer) {
            return Err(format!(
                "Question {position} has a correct answer that is not among its options"
            ));
        }
        if category.requires_context()
            && self.context.as_deref().map_or(true, |c| c.trim().is_empty())
        {
            return Err(format!(
                "Question {position} ({category}) is missing its context"
            ));
        }
        Ok(())
    }
}

/// Generated quiz body. The model is asked for a `questions` object but a
/// bare list is accepted as well.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum QuizPayload {
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

impl QuizPayload {
    pub fn questions(&self) -> &[Question] {
        match self {
            QuizPayload::Wrapped { questions } | QuizPayload::Bare(questions) => questions,
        }
    }

    pub fn into_questions(self) -> Vec<Question> {
        match self {
            QuizPayload::Wrapped { questions } | QuizPayload::Bare(questions) => questions,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Id>::deserialize(deserializer)? {
        Some(Id::Text(text)) => text,
        Some(Id::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
