use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Category, dto::request::GenerateQuizRequest},
    services::{
        llm_gateway::ChatCompletionGateway, prompt_builder::build_quiz_prompt,
        response_decoder::ResponseDecoder,
    },
};

pub const QUIZ_FIELDS_REQUIRED: &str = "Category and count are required";
pub const QUIZ_GENERATION_FAILED: &str = "Failed to generate quiz";

pub struct QuizService {
    gateway: Arc<dyn ChatCompletionGateway>,
    decoder: ResponseDecoder,
}

impl QuizService {
    pub fn new(gateway: Arc<dyn ChatCompletionGateway>, strict_payloads: bool) -> Self {
        Self {
            gateway,
            decoder: ResponseDecoder::new(strict_payloads),
        }
    }

    pub async fn generate_quiz(&self, request: &GenerateQuizRequest) -> AppResult<Value> {
        request
            .validate()
            .map_err(|_| AppError::ValidationError(QUIZ_FIELDS_REQUIRED.to_string()))?;

        let (Some(category), Some(count)) = (request.category.as_deref(), request.count) else {
            return Err(AppError::ValidationError(QUIZ_FIELDS_REQUIRED.to_string()));
        };
        let category: Category = category.parse()?;
        let difficulty = request.difficulty();

        log::info!("Generating {count} {category} questions at {difficulty} level");

        let prompt = build_quiz_prompt(category, difficulty, count);
        let content = self.gateway.complete_json(&prompt).await?;

        self.decoder
            .decode_quiz(content, category, QUIZ_GENERATION_FAILED)
    }
}
