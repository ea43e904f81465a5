use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Category, Lesson, QuizPayload},
};

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*\s*\n(?P<body>.*?)\n?\s*```\s*$")
        .expect("CODE_FENCE is a valid regex pattern")
});

/// Turns raw completion text into JSON, validating it against the typed
/// schema when `strict` is set. The returned value is the parsed document
/// itself so callers can pass it through untouched.
pub struct ResponseDecoder {
    strict: bool,
}

impl ResponseDecoder {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn decode_quiz(
        &self,
        content: Option<String>,
        category: Category,
        empty_message: &str,
    ) -> AppResult<Value> {
        let value = parse_content(content, empty_message)?;
        if self.strict {
            let payload: QuizPayload = serde_json::from_value(value.clone()).map_err(|e| {
                AppError::DecodeError(format!("Generated quiz does not match the question schema: {e}"))
            })?;
            for (index, question) in payload.questions().iter().enumerate() {
                question.check(category, index).map_err(AppError::DecodeError)?;
            }
            log::debug!(
                "Decoded {} {} questions",
                payload.questions().len(),
                category
            );
        }
        Ok(value)
    }

    pub fn decode_lesson(
        &self,
        content: Option<String>,
        category: Category,
        empty_message: &str,
    ) -> AppResult<Value> {
        let value = parse_content(content, empty_message)?;
        if self.strict {
            let lesson: Lesson = serde_json::from_value(value.clone()).map_err(|e| {
                AppError::DecodeError(format!("Generated lesson does not match the lesson schema: {e}"))
            })?;
            lesson.check(category).map_err(AppError::DecodeError)?;
        }
        Ok(value)
    }
}

fn parse_content(content: Option<String>, empty_message: &str) -> AppResult<Value> {
    let text = content.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AppError::EmptyResponse(empty_message.to_string()));
    }

    let body = strip_code_fence(&text);
    let value: Value = serde_json::from_str(body)?;
    if !(value.is_object() || value.is_array()) {
        return Err(AppError::DecodeError(
            "Generated content is not a JSON object or array".to_string(),
        ));
    }
    Ok(value)
}

/// Models occasionally wrap JSON in a markdown fence despite the JSON mode.
pub fn strip_code_fence(text: &str) -> &str {
    match CODE_FENCE.captures(text).and_then(|c| c.name("body")) {
        Some(body) => body.as_str(),
        None => text.trim(),
    }
}
