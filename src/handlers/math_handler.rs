use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{SubmitAnswerRequest, SubmitNameRequest},
};

#[get("/api/math")]
pub async fn get_math_assistant(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.math_assistant.snapshot().await)
}

#[post("/api/math/start")]
pub async fn start_chat(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.math_assistant.start().await)
}

#[post("/api/math/name")]
pub async fn submit_name(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SubmitNameRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let snapshot = state.math_assistant.submit_name(&request.name).await;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[post("/api/math/answer")]
pub async fn submit_answer(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let snapshot = state.math_assistant.submit_answer(&request.option).await;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[post("/api/math/restart")]
pub async fn restart_quiz(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.math_assistant.restart().await)
}
