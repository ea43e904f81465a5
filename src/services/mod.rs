pub mod lesson_service;
pub mod llm_gateway;
pub mod prompt_builder;
pub mod quiz_service;
pub mod response_decoder;

pub use lesson_service::LessonService;
pub use llm_gateway::{ChatCompletionGateway, OpenAiGateway};
pub use quiz_service::QuizService;
