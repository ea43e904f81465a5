pub mod health_handler;
pub mod quiz_handler;
pub mod teach_handler;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;

pub use health_handler::health_check;
pub use quiz_handler::generate_quiz;
pub use teach_handler::teach;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(generate_quiz)
        .service(teach)
        .service(health_check);
}

/// Malformed bodies answer with the same `{error, code}` shape as every
/// other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        log::warn!("Rejected request body: {err}");
        AppError::ValidationError(format!("Invalid request body: {err}")).into()
    })
}
