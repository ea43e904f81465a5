use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::{
        domain::{Lesson, QuizPayload, Question},
        dto::{
            request::{GenerateQuizRequest, TeachRequest},
            response::ErrorBody,
        },
    },
    services::{LessonService, QuizService},
};

pub const NO_QUESTIONS_GENERATED: &str = "No questions generated. Please try again.";

/// How client sessions reach the two generation routes.
#[async_trait]
pub trait PrepBackend: Send + Sync {
    async fn generate_quiz(&self, request: &GenerateQuizRequest) -> AppResult<Value>;
    async fn teach(&self, request: &TeachRequest) -> AppResult<Value>;
}

/// Talks to a running server over HTTP.
pub struct HttpPrepClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPrepClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback_error: &str,
    ) -> AppResult<Value> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("POST {url}");

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback_error.to_string());
        Err(error_for_status(status, message))
    }
}

fn error_for_status(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::BAD_REQUEST => AppError::ValidationError(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::UpstreamError(message),
    }
}

#[async_trait]
impl PrepBackend for HttpPrepClient {
    async fn generate_quiz(&self, request: &GenerateQuizRequest) -> AppResult<Value> {
        self.post("/api/generate-quiz", request, "Failed to generate quiz")
            .await
    }

    async fn teach(&self, request: &TeachRequest) -> AppResult<Value> {
        self.post("/api/teach", request, "Failed to load lesson").await
    }
}

/// Calls the generation services in-process, skipping HTTP.
pub struct LocalBackend {
    quiz_service: Arc<QuizService>,
    lesson_service: Arc<LessonService>,
}

impl LocalBackend {
    pub fn new(quiz_service: Arc<QuizService>, lesson_service: Arc<LessonService>) -> Self {
        Self {
            quiz_service,
            lesson_service,
        }
    }
}

impl From<&AppState> for LocalBackend {
    fn from(state: &AppState) -> Self {
        Self::new(state.quiz_service.clone(), state.lesson_service.clone())
    }
}

#[async_trait]
impl PrepBackend for LocalBackend {
    async fn generate_quiz(&self, request: &GenerateQuizRequest) -> AppResult<Value> {
        self.quiz_service.generate_quiz(request).await
    }

    async fn teach(&self, request: &TeachRequest) -> AppResult<Value> {
        self.lesson_service.generate_lesson(request).await
    }
}

/// Reads the question list out of a quiz response. Both the `questions`
/// object and a bare list are accepted; anything else, a null `questions`
/// included, counts as empty.
pub fn questions_from_payload(value: Value) -> AppResult<Vec<Question>> {
    let is_quiz_shape =
        value.is_array() || value.get("questions").is_some_and(|q| !q.is_null());
    let mut questions = if is_quiz_shape {
        serde_json::from_value::<QuizPayload>(value)
            .map_err(|e| AppError::DecodeError(format!("Unreadable quiz questions: {e}")))?
            .into_questions()
    } else {
        Vec::new()
    };

    if questions.is_empty() {
        return Err(AppError::NotFound(NO_QUESTIONS_GENERATED.to_string()));
    }

    for question in questions.iter_mut().filter(|q| q.id.trim().is_empty()) {
        question.id = Uuid::new_v4().to_string();
    }
    Ok(questions)
}

pub fn lesson_from_payload(value: Value) -> AppResult<Lesson> {
    serde_json::from_value(value)
        .map_err(|e| AppError::DecodeError(format!("Unreadable lesson: {e}")))
}
