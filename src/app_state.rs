use std::sync::Arc;

use crate::{
    config::Config,
    services::{ChatCompletionGateway, LessonService, OpenAiGateway, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub lesson_service: Arc<LessonService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gateway = Arc::new(OpenAiGateway::new(&config));
        Self::with_gateway(config, gateway)
    }

    pub fn with_gateway(config: Config, gateway: Arc<dyn ChatCompletionGateway>) -> Self {
        let quiz_service = Arc::new(QuizService::new(gateway.clone(), config.strict_payloads));
        let lesson_service = Arc::new(LessonService::new(gateway, config.strict_payloads));

        Self {
            quiz_service,
            lesson_service,
            config: Arc::new(config),
        }
    }
}
