use actix_web::{post, web, HttpRequest, HttpResponse, ResponseError};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::request::GenerateQuizRequest,
};

#[post("/api/generate-quiz")]
async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = state
        .quiz_service
        .generate_quiz(&request)
        .await
        .inspect_err(|err| log_failure(&req, "Error generating quiz", err))?;
    Ok(HttpResponse::Ok().json(payload))
}

/// Logs a failed request under its request id; 5xx as errors, the rest as
/// warnings.
pub(crate) fn log_failure(req: &HttpRequest, context: &str, err: &AppError) {
    let line = failure_line(context, get_request_id(req).as_deref(), err);
    if err.status_code().is_server_error() {
        log::error!("{line}");
    } else {
        log::warn!("{line}");
    }
}

pub(crate) fn failure_line(context: &str, request_id: Option<&str>, err: &AppError) -> String {
    match request_id {
        Some(id) => format!("{context} [{id}]: {err}"),
        None => format!("{context}: {err}"),
    }
}
