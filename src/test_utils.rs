use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    client::backend::PrepBackend,
    errors::{AppError, AppResult},
    models::dto::request::{GenerateQuizRequest, TeachRequest},
};

#[cfg(test)]
pub mod fixtures {
    use serde_json::Value;

    use crate::models::domain::{Category, Lesson, LessonItem, Question};

    fn options(prefix: &str) -> Vec<String> {
        (1..=4).map(|n| format!("{prefix} {n}")).collect()
    }

    /// A question that passes the strict shape checks. The correct answer
    /// is always the first option.
    pub fn question(category: Category, id: &str) -> Question {
        let options = options(&format!("{id} option"));
        Question {
            id: id.to_string(),
            kind: category,
            question_text: format!("Which option fits {id}?"),
            context: category
                .requires_context()
                .then(|| format!("Context passage for {id}.")),
            correct_answer: options[0].clone(),
            options,
            explanation: format!("Option 1 is right for {id}."),
        }
    }

    /// `{ "questions": [...] }` with ids `q-1` to `q-{count}`.
    pub fn quiz_json(category: Category, count: usize) -> Value {
        let questions: Vec<Question> = (1..=count)
            .map(|n| question(category, &format!("q-{n}")))
            .collect();
        serde_json::json!({ "questions": questions })
    }

    pub fn lesson_item(category: Category, index: usize) -> LessonItem {
        let options = options(&format!("item {index} option"));
        let stimulus = format!("Stimulus {index}");
        LessonItem {
            base_pair: (category == Category::Analogy).then(|| stimulus.clone()),
            sentence: (category == Category::NonLogicalWord).then(|| stimulus.clone()),
            paragraph: (category == Category::ParagraphMeaning).then(|| stimulus.clone()),
            question: Some(format!("Practice prompt {index}")),
            correct_answer: options[index % options.len()].clone(),
            options,
            explanation: format!("Explanation {index}"),
        }
    }

    pub fn lesson(category: Category) -> Lesson {
        Lesson {
            explanation: format!("How to approach {category} questions."),
            common_tricks: vec!["Distractors share surface features.".to_string()],
            examples: (0..2).map(|i| lesson_item(category, i)).collect(),
            practice: (0..3).map(|i| lesson_item(category, i)).collect(),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

/// Backend that answers every call with the same canned result.
pub struct StaticBackend {
    result: AppResult<Value>,
    calls: AtomicUsize,
}

impl StaticBackend {
    pub fn quiz(payload: Value) -> Self {
        Self::new(Ok(payload))
    }

    pub fn lesson(payload: Value) -> Self {
        Self::new(Ok(payload))
    }

    pub fn failing(error: AppError) -> Self {
        Self::new(Err(error))
    }

    fn new(result: AppResult<Value>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> AppResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

#[async_trait]
impl PrepBackend for StaticBackend {
    async fn generate_quiz(&self, _request: &GenerateQuizRequest) -> AppResult<Value> {
        self.respond()
    }

    async fn teach(&self, _request: &TeachRequest) -> AppResult<Value> {
        self.respond()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::Category;

    #[test]
    fn test_fixtures_pass_shape_checks() {
        for category in Category::ALL {
            let q = question(category, "q-1");
            assert!(q.check(category, 0).is_ok(), "{category}");
            assert!(lesson(category).check(category).is_ok(), "{category}");
        }
    }

    #[test]
    fn test_quiz_json_numbers_ids_from_one() {
        let json = quiz_json(Category::Analogy, 3);
        assert_eq!(json["questions"][0]["id"], "q-1");
        assert_eq!(json["questions"][2]["id"], "q-3");
    }
}
