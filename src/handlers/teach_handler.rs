use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState, errors::AppError, handlers::quiz_handler::log_failure,
    models::dto::request::TeachRequest,
};

#[post("/api/teach")]
async fn teach(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<TeachRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = state
        .lesson_service
        .generate_lesson(&request)
        .await
        .inspect_err(|err| log_failure(&req, "Error generating lesson", err))?;
    Ok(HttpResponse::Ok().json(payload))
}
