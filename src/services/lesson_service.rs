use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Category, dto::request::TeachRequest},
    services::{
        llm_gateway::ChatCompletionGateway, prompt_builder::build_lesson_prompt,
        response_decoder::ResponseDecoder,
    },
};

pub const LESSON_CATEGORY_REQUIRED: &str = "Category is required";
pub const LESSON_GENERATION_FAILED: &str = "Failed to generate lesson";

pub struct LessonService {
    gateway: Arc<dyn ChatCompletionGateway>,
    decoder: ResponseDecoder,
}

impl LessonService {
    pub fn new(gateway: Arc<dyn ChatCompletionGateway>, strict_payloads: bool) -> Self {
        Self {
            gateway,
            decoder: ResponseDecoder::new(strict_payloads),
        }
    }

    pub async fn generate_lesson(&self, request: &TeachRequest) -> AppResult<Value> {
        request
            .validate()
            .map_err(|_| AppError::ValidationError(LESSON_CATEGORY_REQUIRED.to_string()))?;

        let category: Category = request
            .category
            .as_deref()
            .ok_or_else(|| AppError::ValidationError(LESSON_CATEGORY_REQUIRED.to_string()))?
            .parse()?;

        log::info!("Generating lesson for {category}");

        let prompt = build_lesson_prompt(category);
        let content = self.gateway.complete_json(&prompt).await?;

        self.decoder
            .decode_lesson(content, category, LESSON_GENERATION_FAILED)
    }
}
